//! Medical-center map endpoints.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Router,
};
use fundacja_common::AppResult;
use fundacja_core::{ImportReport, MedicalCenterResponse};
use serde::{Deserialize, Serialize};

use crate::{extractors::AdminKey, response::ApiResponse, state::AppState};

/// Locations listing filters.
#[derive(Debug, Deserialize)]
pub struct LocationsParams {
    /// Case-insensitive substring on treated diseases.
    pub disease: Option<String>,
    /// Case-insensitive substring on the department name.
    pub search: Option<String>,
}

/// All medical centers, optionally filtered. No pagination.
async fn locations(
    State(state): State<AppState>,
    Query(params): Query<LocationsParams>,
) -> AppResult<ApiResponse<Vec<MedicalCenterResponse>>> {
    let centers = state
        .medical_center_service
        .list(params.disease.as_deref(), params.search.as_deref())
        .await?;
    Ok(ApiResponse::ok(centers))
}

/// Proximity query parameters.
#[derive(Debug, Deserialize)]
pub struct NearParams {
    pub lat: f64,
    pub lng: f64,
    /// Bounding-box half-width in degrees, defaults to 0.5.
    pub lat_range: Option<f64>,
    pub lng_range: Option<f64>,
}

/// Centers inside a fixed-delta bounding box around a coordinate.
async fn near(
    State(state): State<AppState>,
    Query(params): Query<NearParams>,
) -> AppResult<ApiResponse<Vec<MedicalCenterResponse>>> {
    let centers = state
        .medical_center_service
        .near(params.lat, params.lng, params.lat_range, params.lng_range)
        .await?;
    Ok(ApiResponse::ok(centers))
}

/// Import outcome returned to the operator.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub imported: u32,
    pub updated: u32,
    pub total_processed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            success: true,
            imported: report.imported,
            updated: report.updated,
            total_processed: report.total_processed(),
            errors: if report.errors.is_empty() {
                None
            } else {
                Some(report.errors)
            },
        }
    }
}

/// Run the locations import against the external feed.
async fn import(
    State(state): State<AppState>,
    _: AdminKey,
) -> AppResult<ApiResponse<ImportResponse>> {
    let report = state.medical_center_service.import().await?;
    Ok(ApiResponse::ok(report.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/locations", get(locations))
        .route("/locations/near", get(near))
        .route("/locations/import", post(import))
}

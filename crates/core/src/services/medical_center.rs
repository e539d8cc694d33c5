//! Medical center service: public listing and the external import job.

use std::time::Duration;

use fundacja_common::config::ImportConfig;
use fundacja_common::{AppError, AppResult, IdGenerator};
use fundacja_db::entities::medical_center;
use fundacja_db::repositories::MedicalCenterRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Default bounding-box half-width in degrees for proximity queries.
/// Fixed degree deltas, not true distance; a known approximation.
pub const DEFAULT_RANGE_DEG: f64 = 0.5;

/// Medical center fields exposed on the public locations API. Field
/// names mirror the external feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalCenterResponse {
    pub id: String,
    pub department: String,
    pub treated_diseases: String,
    pub address: String,
    pub phone: String,
    pub lat: f64,
    pub lng: f64,
}

impl From<medical_center::Model> for MedicalCenterResponse {
    fn from(c: medical_center::Model) -> Self {
        Self {
            id: c.id,
            department: c.department,
            treated_diseases: c.treated_diseases,
            address: c.address,
            phone: c.phone,
            lat: c.lat,
            lng: c.lng,
        }
    }
}

/// One validated record from the external locations feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocationRecord {
    department: String,
    treated_diseases: String,
    address: String,
    phone: String,
    lat: f64,
    lng: f64,
}

/// Outcome of an import run. Partial success is normal: malformed
/// records land in `errors` without failing the batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub imported: u32,
    pub updated: u32,
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Records that made it into the store this run.
    #[must_use]
    pub const fn total_processed(&self) -> u32 {
        self.imported + self.updated
    }
}

/// Medical center service for business logic.
#[derive(Clone)]
pub struct MedicalCenterService {
    center_repo: MedicalCenterRepository,
    import_config: ImportConfig,
    id_gen: IdGenerator,
}

impl MedicalCenterService {
    /// Create a new medical center service.
    #[must_use]
    pub const fn new(center_repo: MedicalCenterRepository, import_config: ImportConfig) -> Self {
        Self {
            center_repo,
            import_config,
            id_gen: IdGenerator::new(),
        }
    }

    /// All centers with optional `disease` and `search` filters, ordered
    /// by department. No pagination.
    pub async fn list(
        &self,
        disease: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Vec<MedicalCenterResponse>> {
        let centers = self.center_repo.list(disease, search).await?;
        Ok(centers.into_iter().map(Into::into).collect())
    }

    /// Centers near a coordinate, using the fixed-delta bounding box.
    pub async fn near(
        &self,
        lat: f64,
        lng: f64,
        lat_range: Option<f64>,
        lng_range: Option<f64>,
    ) -> AppResult<Vec<MedicalCenterResponse>> {
        let centers = self
            .center_repo
            .near_location(
                lat,
                lng,
                lat_range.unwrap_or(DEFAULT_RANGE_DEG),
                lng_range.unwrap_or(DEFAULT_RANGE_DEG),
            )
            .await?;
        Ok(centers.into_iter().map(Into::into).collect())
    }

    /// Run the one-shot import: fetch the external feed and upsert every
    /// record, keyed by (department, address).
    pub async fn import(&self) -> AppResult<ImportReport> {
        let records = self.fetch_records().await?;
        tracing::info!(count = records.len(), "Fetched locations from external feed");
        self.import_records(records).await
    }

    /// Fetch the raw JSON array from the configured source. The fetch is
    /// bounded by the configured timeout and never retried; failures
    /// surface as upstream errors.
    async fn fetch_records(&self) -> AppResult<Vec<serde_json::Value>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.import_config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        let response = client
            .get(&self.import_config.source_url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to fetch locations: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Locations source returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid JSON from locations source: {e}")))
    }

    /// Upsert a batch of raw feed records. A record missing a required
    /// field becomes an error string and is skipped; storage failures on
    /// one record do not abort the rest.
    pub async fn import_records(
        &self,
        records: Vec<serde_json::Value>,
    ) -> AppResult<ImportReport> {
        let mut report = ImportReport::default();

        for (index, raw) in records.into_iter().enumerate() {
            let record = match parse_record(&raw) {
                Ok(record) => record,
                Err(message) => {
                    report.errors.push(format!("Record {index}: {message}"));
                    continue;
                }
            };

            match self.upsert(record).await {
                Ok(true) => report.updated += 1,
                Ok(false) => report.imported += 1,
                Err(e) => report.errors.push(format!("Record {index}: {e}")),
            }
        }

        tracing::info!(
            imported = report.imported,
            updated = report.updated,
            errors = report.errors.len(),
            "Locations import finished"
        );

        Ok(report)
    }

    /// Returns true when an existing row was updated, false on insert.
    async fn upsert(&self, record: LocationRecord) -> AppResult<bool> {
        let existing = self
            .center_repo
            .find_by_department_address(&record.department, &record.address)
            .await?;

        if let Some(existing) = existing {
            let mut active: medical_center::ActiveModel = existing.into();
            active.treated_diseases = Set(record.treated_diseases);
            active.phone = Set(record.phone);
            active.lat = Set(record.lat);
            active.lng = Set(record.lng);
            active.updated_at = Set(Some(chrono::Utc::now().into()));
            self.center_repo.update(active).await?;
            return Ok(true);
        }

        let model = medical_center::ActiveModel {
            id: Set(self.id_gen.generate()),
            department: Set(record.department),
            treated_diseases: Set(record.treated_diseases),
            address: Set(record.address),
            phone: Set(record.phone),
            lat: Set(record.lat),
            lng: Set(record.lng),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };
        self.center_repo.create(model).await?;
        Ok(false)
    }
}

fn parse_record(raw: &serde_json::Value) -> Result<LocationRecord, String> {
    for field in [
        "department",
        "treatedDiseases",
        "address",
        "phone",
        "lat",
        "lng",
    ] {
        if raw.get(field).is_none() || raw[field].is_null() {
            return Err(format!("missing field `{field}`"));
        }
    }

    serde_json::from_value(raw.clone()).map_err(|e| format!("malformed record: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;
    use std::sync::Arc;

    fn service(db: Arc<sea_orm::DatabaseConnection>) -> MedicalCenterService {
        MedicalCenterService::new(
            MedicalCenterRepository::new(db),
            ImportConfig::default(),
        )
    }

    fn existing_center() -> medical_center::Model {
        medical_center::Model {
            id: "c1".to_string(),
            department: "Oddzial Neurologii".to_string(),
            treated_diseases: "padaczka".to_string(),
            address: "ul. Testowa 1, Warszawa".to_string(),
            phone: "22 123 45 67".to_string(),
            lat: 52.23,
            lng: 21.01,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn feed_record(department: &str, address: &str) -> serde_json::Value {
        json!({
            "department": department,
            "treatedDiseases": "padaczka, migrena",
            "address": address,
            "phone": "22 765 43 21",
            "lat": 52.23,
            "lng": 21.01,
        })
    }

    #[test]
    fn test_parse_record_reports_missing_field() {
        let raw = json!({
            "department": "Oddzial Neurologii",
            "address": "ul. Testowa 1",
            "phone": "123",
            "lat": 52.0,
            "lng": 21.0,
        });

        let err = parse_record(&raw).unwrap_err();
        assert!(err.contains("treatedDiseases"));
    }

    #[tokio::test]
    async fn test_import_updates_existing_match() {
        let mut updated = existing_center();
        updated.treated_diseases = "padaczka, migrena".to_string();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // natural-key lookup finds the existing row
                .append_query_results([[existing_center()]])
                // update returns the refreshed row
                .append_query_results([[updated]])
                .into_connection(),
        );

        let report = service(db)
            .import_records(vec![feed_record(
                "Oddzial Neurologii",
                "ul. Testowa 1, Warszawa",
            )])
            .await
            .unwrap();

        assert_eq!(report.updated, 1);
        assert_eq!(report.imported, 0);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_import_creates_new_record() {
        let created = existing_center();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // natural-key lookup misses
                .append_query_results([Vec::<medical_center::Model>::new()])
                // insert returns the new row
                .append_query_results([[created]])
                .into_connection(),
        );

        let report = service(db)
            .import_records(vec![feed_record(
                "Oddzial Neurologii",
                "ul. Testowa 1, Warszawa",
            )])
            .await
            .unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.updated, 0);
        assert_eq!(report.total_processed(), 1);
    }

    #[tokio::test]
    async fn test_import_skips_malformed_records() {
        let created = existing_center();

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<medical_center::Model>::new()])
                .append_query_results([[created]])
                .into_connection(),
        );

        let report = service(db)
            .import_records(vec![
                json!({"department": "Broken"}),
                feed_record("Oddzial Neurologii", "ul. Testowa 1, Warszawa"),
            ])
            .await
            .unwrap();

        assert_eq!(report.imported, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Record 0"));
    }
}

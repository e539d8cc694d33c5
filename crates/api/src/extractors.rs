//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use fundacja_common::AppError;

use crate::state::AppState;

/// Header carrying the shared administrative key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Guard for write endpoints and the locations import: the `X-Api-Key`
/// header must match the configured shared secret.
///
/// A missing server-side secret is a configuration failure (500); a
/// missing or wrong header is an authorization failure (403). The two
/// never collapse into one error kind.
#[derive(Debug, Clone, Copy)]
pub struct AdminKey;

impl FromRequestParts<AppState> for AdminKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.import.api_key.as_deref() else {
            return Err(AppError::Config(
                "api_key is not configured on the server".to_string(),
            ));
        };

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());

        match provided {
            Some(key) if key == expected => Ok(Self),
            _ => Err(AppError::Forbidden(
                "Invalid or missing API key".to_string(),
            )),
        }
    }
}

use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// Extractor guarding admin routes: a valid, unexpired bearer token issued
/// by the login gate.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: Uuid,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        if !auth_str.starts_with("Bearer ") {
            return Err(AppError::BadRequest("Invalid Authorization scheme".into()));
        }
        let token = auth_str.trim_start_matches("Bearer ").trim();
        let token = Uuid::parse_str(token).map_err(|_| AppError::Unauthorized)?;

        state.auth.validate(token).await?;

        Ok(AdminSession { token })
    }
}

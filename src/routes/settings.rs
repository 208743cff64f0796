use axum::{Json, Router, extract::State, routing::get};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::auth::AdminSession,
    models::{AppSettings, FooterColumn, FooterSettings},
    response::ApiResponse,
    services::settings_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFooterRequest {
    pub tagline: String,
    pub copyright: String,
    #[serde(default)]
    pub columns: Vec<FooterColumn>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub store_name: Option<String>,
    pub currency: Option<String>,
    pub tax_rate: Option<Decimal>,
    pub support_email: Option<String>,
}

// Two sibling resources, so this router is merged rather than nested.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/footer", get(get_footer).put(update_footer))
        .route("/settings", get(get_settings).put(update_settings))
}

#[utoipa::path(
    get,
    path = "/api/footer",
    responses(
        (status = 200, description = "Footer content", body = ApiResponse<FooterSettings>)
    ),
    tag = "Settings"
)]
pub async fn get_footer(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<FooterSettings>>> {
    let resp = settings_service::get_footer(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/footer",
    request_body = UpdateFooterRequest,
    responses(
        (status = 200, description = "Replaced footer content", body = ApiResponse<FooterSettings>)
    ),
    security(("bearer_auth" = [])),
    tag = "Settings"
)]
pub async fn update_footer(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<UpdateFooterRequest>,
) -> AppResult<Json<ApiResponse<FooterSettings>>> {
    let resp = settings_service::update_footer(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Store settings", body = ApiResponse<AppSettings>)
    ),
    tag = "Settings"
)]
pub async fn get_settings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<AppSettings>>> {
    let resp = settings_service::get_settings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated store settings", body = ApiResponse<AppSettings>)
    ),
    security(("bearer_auth" = [])),
    tag = "Settings"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<UpdateSettingsRequest>,
) -> AppResult<Json<ApiResponse<AppSettings>>> {
    let resp = settings_service::update_settings(&state, payload).await?;
    Ok(Json(resp))
}

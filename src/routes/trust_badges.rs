use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AdminSession,
    models::TrustBadge,
    response::ApiResponse,
    routes::params::ReorderRequest,
    services::trust_badge_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrustBadgeRequest {
    pub text: String,
    pub icon: Option<String>,
    pub border_color: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrustBadgeRequest {
    pub text: Option<String>,
    pub icon: Option<String>,
    pub border_color: Option<String>,
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TrustBadgeList {
    #[schema(value_type = Vec<TrustBadge>)]
    pub items: Vec<TrustBadge>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trust_badges).post(create_trust_badge))
        .route("/{id}", put(update_trust_badge).delete(delete_trust_badge))
        .route("/{id}/active", patch(toggle_trust_badge_active))
        .route("/{id}/position", patch(reorder_trust_badge))
}

#[utoipa::path(
    get,
    path = "/api/trust-badges",
    responses(
        (status = 200, description = "Trust badges ordered by position", body = ApiResponse<TrustBadgeList>)
    ),
    tag = "Trust badges"
)]
pub async fn list_trust_badges(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TrustBadgeList>>> {
    let resp = trust_badge_service::list_trust_badges(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/trust-badges",
    request_body = CreateTrustBadgeRequest,
    responses(
        (status = 200, description = "Create trust badge", body = ApiResponse<TrustBadge>),
        (status = 400, description = "Missing required field"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trust badges"
)]
pub async fn create_trust_badge(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<CreateTrustBadgeRequest>,
) -> AppResult<Json<ApiResponse<TrustBadge>>> {
    let resp = trust_badge_service::create_trust_badge(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/trust-badges/{id}",
    params(("id" = Uuid, Path, description = "Trust badge ID")),
    request_body = UpdateTrustBadgeRequest,
    responses(
        (status = 200, description = "Updated trust badge", body = ApiResponse<TrustBadge>),
        (status = 404, description = "Trust badge not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trust badges"
)]
pub async fn update_trust_badge(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTrustBadgeRequest>,
) -> AppResult<Json<ApiResponse<TrustBadge>>> {
    let resp = trust_badge_service::update_trust_badge(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/trust-badges/{id}",
    params(("id" = Uuid, Path, description = "Trust badge ID")),
    responses(
        (status = 200, description = "Deleted trust badge"),
        (status = 404, description = "Trust badge not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trust badges"
)]
pub async fn delete_trust_badge(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = trust_badge_service::delete_trust_badge(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/trust-badges/{id}/active",
    params(("id" = Uuid, Path, description = "Trust badge ID")),
    responses(
        (status = 200, description = "Toggled active flag", body = ApiResponse<TrustBadge>),
        (status = 404, description = "Trust badge not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trust badges"
)]
pub async fn toggle_trust_badge_active(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<TrustBadge>>> {
    let resp = trust_badge_service::toggle_trust_badge_active(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/trust-badges/{id}/position",
    params(("id" = Uuid, Path, description = "Trust badge ID")),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Moved and re-sequenced", body = ApiResponse<TrustBadge>),
        (status = 404, description = "Trust badge not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Trust badges"
)]
pub async fn reorder_trust_badge(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReorderRequest>,
) -> AppResult<Json<ApiResponse<TrustBadge>>> {
    let resp = trust_badge_service::reorder_trust_badge(&state, id, payload.direction).await?;
    Ok(Json(resp))
}

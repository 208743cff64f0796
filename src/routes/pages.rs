use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::auth::AdminSession,
    models::Page,
    response::ApiResponse,
    services::page_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub title: String,
    pub slug: String,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PageList {
    #[schema(value_type = Vec<Page>)]
    pub items: Vec<Page>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pages).post(create_page))
        .route("/{id}", get(get_page).put(update_page).delete(delete_page))
}

#[utoipa::path(
    get,
    path = "/api/pages",
    responses(
        (status = 200, description = "All pages", body = ApiResponse<PageList>)
    ),
    tag = "Pages"
)]
pub async fn list_pages(State(state): State<AppState>) -> AppResult<Json<ApiResponse<PageList>>> {
    let resp = page_service::list_pages(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pages/{id}",
    params(("id" = Uuid, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Get page", body = ApiResponse<Page>),
        (status = 404, description = "Page not found"),
    ),
    tag = "Pages"
)]
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Page>>> {
    let resp = page_service::get_page(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/pages",
    request_body = CreatePageRequest,
    responses(
        (status = 200, description = "Create page", body = ApiResponse<Page>),
        (status = 400, description = "Missing field or duplicate slug"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn create_page(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<CreatePageRequest>,
) -> AppResult<Json<ApiResponse<Page>>> {
    let resp = page_service::create_page(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/pages/{id}",
    params(("id" = Uuid, Path, description = "Page ID")),
    request_body = UpdatePageRequest,
    responses(
        (status = 200, description = "Updated page", body = ApiResponse<Page>),
        (status = 400, description = "Duplicate slug"),
        (status = 404, description = "Page not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn update_page(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePageRequest>,
) -> AppResult<Json<ApiResponse<Page>>> {
    let resp = page_service::update_page(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/pages/{id}",
    params(("id" = Uuid, Path, description = "Page ID")),
    responses(
        (status = 200, description = "Deleted page"),
        (status = 404, description = "Page not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Pages"
)]
pub async fn delete_page(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = page_service::delete_page(&state, id).await?;
    Ok(Json(resp))
}

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AdminSession,
    response::ApiResponse,
    services::image_service,
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreImageRequest {
    /// Base64-encoded image bytes.
    pub data: String,
    pub content_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageStored {
    pub id: Uuid,
    pub url: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/store", post(store_image))
        .route("/{id}", get(get_image))
}

#[utoipa::path(
    post,
    path = "/api/images/store",
    request_body = StoreImageRequest,
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<ImageStored>),
        (status = 400, description = "Invalid base64 or missing content type"),
    ),
    security(("bearer_auth" = [])),
    tag = "Images"
)]
pub async fn store_image(
    State(state): State<AppState>,
    _session: AdminSession,
    Json(payload): Json<StoreImageRequest>,
) -> AppResult<Json<ApiResponse<ImageStored>>> {
    let resp = image_service::store_image(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/images/{id}",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Raw image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Image not found"),
    ),
    tag = "Images"
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let (content_type, bytes) = image_service::get_image(&state, id).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        content_type
            .parse()
            .map_err(|_| AppError::BadRequest("invalid content type".into()))?,
    );
    // Stored images are immutable, so clients can cache them forever.
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    Ok((headers, bytes))
}

use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{LoginRequest, Session},
    error::AppResult,
    middleware::auth::AdminSession,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login admin", body = ApiResponse<Session>),
        (status = 400, description = "Invalid credentials"),
        (status = 429, description = "Locked out after repeated failures"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<Session>>> {
    let session = state.auth.login(&payload.username, &payload.password).await?;
    Ok(Json(ApiResponse::success("Logged in", session, None)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout", body = ApiResponse<serde_json::Value>),
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    state.auth.logout(session.token).await;
    Ok(Json(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartResponse, UpdateCartItemRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{cart_id}", get(get_cart).delete(clear_cart))
        .route("/{cart_id}/items", post(add_cart_item))
        .route(
            "/{cart_id}/items/{product_id}",
            put(update_cart_item).delete(remove_cart_item),
        )
}

#[utoipa::path(
    get,
    path = "/api/cart/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Client-generated cart ID")),
    responses(
        (status = 200, description = "Cart with totals per shipping method", body = ApiResponse<CartResponse>)
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::get_cart(&state, cart_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/cart/{cart_id}/items",
    params(("cart_id" = Uuid, Path, description = "Client-generated cart ID")),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Item added, quantity incremented on repeat", body = ApiResponse<CartResponse>),
        (status = 400, description = "Unknown product"),
    ),
    tag = "Cart"
)]
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
    Json(payload): Json<AddToCartRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::add_item(&state, cart_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/cart/{cart_id}/items/{product_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Client-generated cart ID"),
        ("product_id" = Uuid, Path, description = "Product ID"),
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity set; zero or less removes the line", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart or line not found"),
    ),
    tag = "Cart"
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::update_item(&state, cart_id, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{cart_id}/items/{product_id}",
    params(
        ("cart_id" = Uuid, Path, description = "Client-generated cart ID"),
        ("product_id" = Uuid, Path, description = "Product ID"),
    ),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart or line not found"),
    ),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((cart_id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::remove_item(&state, cart_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/cart/{cart_id}",
    params(("cart_id" = Uuid, Path, description = "Client-generated cart ID")),
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartResponse>)
    ),
    tag = "Cart"
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CartResponse>>> {
    let resp = cart_service::clear_cart(&state, cart_id).await?;
    Ok(Json(resp))
}

use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartResponse, UpdateCartItemRequest},
    error::{AppError, AppResult},
    response::ApiResponse,
    state::AppState,
};

pub async fn get_cart(state: &AppState, cart_id: Uuid) -> AppResult<ApiResponse<CartResponse>> {
    let carts = state.carts.read().await;
    let response = match carts.get(&cart_id) {
        Some(cart) => CartResponse::from_cart(cart_id, cart),
        // An unknown cart id is just an empty session cart, not an error.
        None => CartResponse::from_cart(cart_id, &Default::default()),
    };
    Ok(ApiResponse::success("Cart", response, None))
}

pub async fn add_item(
    state: &AppState,
    cart_id: Uuid,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartResponse>> {
    let product = state
        .store
        .read(|db| {
            db.products
                .iter()
                .find(|p| p.id == payload.product_id)
                .cloned()
        })
        .await;
    let Some(product) = product else {
        return Err(AppError::BadRequest("product not found".into()));
    };

    let mut carts = state.carts.write().await;
    let cart = carts.entry(cart_id).or_default();
    cart.add(&product);

    Ok(ApiResponse::success(
        "Added to cart",
        CartResponse::from_cart(cart_id, cart),
        None,
    ))
}

pub async fn update_item(
    state: &AppState,
    cart_id: Uuid,
    product_id: Uuid,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartResponse>> {
    let mut carts = state.carts.write().await;
    let cart = carts.get_mut(&cart_id).ok_or(AppError::NotFound)?;

    if payload.quantity > 0 && !cart.contains(product_id) {
        return Err(AppError::NotFound);
    }
    cart.update_quantity(product_id, payload.quantity);

    Ok(ApiResponse::success(
        "Cart updated",
        CartResponse::from_cart(cart_id, cart),
        None,
    ))
}

pub async fn remove_item(
    state: &AppState,
    cart_id: Uuid,
    product_id: Uuid,
) -> AppResult<ApiResponse<CartResponse>> {
    let mut carts = state.carts.write().await;
    let cart = carts.get_mut(&cart_id).ok_or(AppError::NotFound)?;

    if !cart.contains(product_id) {
        return Err(AppError::NotFound);
    }
    cart.remove(product_id);

    Ok(ApiResponse::success(
        "Removed from cart",
        CartResponse::from_cart(cart_id, cart),
        None,
    ))
}

pub async fn clear_cart(state: &AppState, cart_id: Uuid) -> AppResult<ApiResponse<CartResponse>> {
    let mut carts = state.carts.write().await;
    carts.remove(&cart_id);
    Ok(ApiResponse::success(
        "Cart cleared",
        CartResponse::from_cart(cart_id, &Default::default()),
        None,
    ))
}

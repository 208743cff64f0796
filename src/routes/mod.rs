use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod banners;
pub mod cart;
pub mod categories;
pub mod customers;
pub mod doc;
pub mod health;
pub mod images;
pub mod orders;
pub mod pages;
pub mod params;
pub mod products;
pub mod settings;
pub mod trust_badges;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/banners", banners::router())
        .nest("/trust-badges", trust_badges::router())
        .nest("/pages", pages::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/customers", customers::router())
        .nest("/images", images::router())
        .merge(settings::router())
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub rating: f32,
    pub brand: Option<String>,
    #[serde(default)]
    pub age_ranges: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub sku: Option<String>,
    pub material: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub rating: Option<f32>,
    pub brand: Option<String>,
    pub age_ranges: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub sku: Option<String>,
    pub material: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

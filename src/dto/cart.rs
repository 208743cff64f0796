use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::cart::{Cart, CartItem, CheckoutTotals};
use crate::models::ShippingMethod;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub method: ShippingMethod,
    #[serde(flatten)]
    pub totals: CheckoutTotals,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_id: Uuid,
    pub items: Vec<CartItem>,
    pub total_items: i32,
    /// Derived totals for every shipping method, so the storefront can show
    /// the checkout breakdown without another round trip.
    pub quotes: Vec<ShippingQuote>,
}

impl CartResponse {
    pub fn from_cart(cart_id: Uuid, cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        let quotes = [
            ShippingMethod::Standard,
            ShippingMethod::Express,
            ShippingMethod::Overnight,
        ]
        .into_iter()
        .map(|method| ShippingQuote {
            method,
            totals: CheckoutTotals::derive(subtotal, method),
        })
        .collect();

        Self {
            cart_id,
            items: cart.items.clone(),
            total_items: cart.total_items(),
            quotes,
        }
    }
}

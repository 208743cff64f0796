//! Session cart and checkout arithmetic. The shipping tiers, free-shipping
//! threshold, and flat tax rate live here and nowhere else.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, ShippingMethod};

pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(50, 0)
}

/// Flat checkout tax. Deliberately independent of the configurable
/// settings.taxRate, which checkout has never consulted.
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

fn tier_cost(method: ShippingMethod) -> Decimal {
    match method {
        ShippingMethod::Standard => Decimal::ZERO,
        ShippingMethod::Express => Decimal::new(999, 2),
        ShippingMethod::Overnight => Decimal::new(1999, 2),
    }
}

pub fn shipping_cost(subtotal: Decimal, method: ShippingMethod) -> Decimal {
    if subtotal >= free_shipping_threshold() {
        Decimal::ZERO
    } else {
        tier_cost(method)
    }
}

pub fn tax(subtotal: Decimal) -> Decimal {
    (subtotal * tax_rate()).round_dp(2)
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CheckoutTotals {
    pub fn derive(subtotal: Decimal, method: ShippingMethod) -> Self {
        let shipping = shipping_cost(subtotal, method);
        let tax = tax(subtotal);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    /// Listed unit price captured at add time; the subtotal never re-derives
    /// from sale/original prices.
    pub price: Decimal,
    pub image: String,
    pub quantity: i32,
}

/// An ordered line collection keyed by product id; adding an existing id
/// increments its quantity instead of appending.
#[derive(Debug, Default, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            line.quantity += 1;
        } else {
            self.items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                image: product.image.clone(),
                quantity: 1,
            });
        }
    }

    /// Zero or negative quantity removes the line.
    pub fn update_quantity(&mut self, product_id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: Uuid) {
        self.items.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.items.iter().any(|l| l.product_id == product_id)
    }

    pub fn total_items(&self) -> i32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(price: i64) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: "Test Rattle".into(),
            description: "A rattle".into(),
            price: Decimal::new(price, 2),
            original_price: None,
            sale_price: None,
            image: "/img/rattle.png".into(),
            category: "Toys & Play".into(),
            rating: 4.0,
            brand: None,
            age_ranges: Vec::new(),
            tags: Vec::new(),
            sku: None,
            material: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn adding_existing_id_increments_quantity_only() {
        let p = product(4000);
        let mut cart = Cart::default();
        cart.add(&p);
        cart.add(&p);
        cart.add(&p);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), Decimal::new(12000, 2));
    }

    #[test]
    fn update_quantity_zero_equals_remove() {
        let p = product(4000);
        let mut a = Cart::default();
        a.add(&p);
        a.update_quantity(p.id, 0);

        let mut b = Cart::default();
        b.add(&p);
        b.remove(p.id);

        assert!(a.is_empty());
        assert_eq!(a.items.len(), b.items.len());
    }

    #[test]
    fn subtotal_uses_listed_price_captured_at_add_time() {
        let mut p = product(4000);
        p.sale_price = Some(Decimal::new(1000, 2));
        let mut cart = Cart::default();
        cart.add(&p);
        cart.update_quantity(p.id, 2);
        // Listed price, not the sale price.
        assert_eq!(cart.subtotal(), Decimal::new(8000, 2));
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::default();
        cart.add(&product(4000));
        cart.add(&product(2500));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn standard_shipping_below_threshold() {
        // Subtotal 40, standard: the standard tier is free regardless of
        // the threshold.
        let t = CheckoutTotals::derive(Decimal::new(4000, 2), ShippingMethod::Standard);
        assert_eq!(t.shipping, Decimal::ZERO);
        assert_eq!(t.tax, Decimal::new(320, 2));
        assert_eq!(t.total, Decimal::new(4320, 2));
    }

    #[test]
    fn express_shipping_below_threshold() {
        let t = CheckoutTotals::derive(Decimal::new(4000, 2), ShippingMethod::Express);
        assert_eq!(t.shipping, Decimal::new(999, 2));
        assert_eq!(t.tax, Decimal::new(320, 2));
        assert_eq!(t.total, Decimal::new(5319, 2));
    }

    #[test]
    fn threshold_overrides_tier_cost() {
        let t = CheckoutTotals::derive(Decimal::new(6000, 2), ShippingMethod::Express);
        assert_eq!(t.shipping, Decimal::ZERO);
        assert_eq!(t.tax, Decimal::new(480, 2));
        assert_eq!(t.total, Decimal::new(6480, 2));
    }

    #[test]
    fn total_invariant_holds_for_every_method() {
        let subtotals = [0i64, 1, 999, 4999, 5000, 5001, 123456];
        let methods = [
            ShippingMethod::Standard,
            ShippingMethod::Express,
            ShippingMethod::Overnight,
        ];
        for cents in subtotals {
            let subtotal = Decimal::new(cents, 2);
            for method in methods {
                let t = CheckoutTotals::derive(subtotal, method);
                assert_eq!(t.total, t.subtotal + t.shipping + t.tax);
                if subtotal >= free_shipping_threshold() {
                    assert_eq!(t.shipping, Decimal::ZERO);
                }
            }
        }
    }
}

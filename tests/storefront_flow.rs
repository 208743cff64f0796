use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tinytots_commerce_api::{
    dto::{
        cart::AddToCartRequest,
        orders::{PlaceOrderRequest, UpdateCustomerRequest, UpdateOrderStatusRequest},
        products::CreateProductRequest,
    },
    models::{Address, OrderStatus, ShippingMethod},
    routes::categories::CreateCategoryRequest,
    routes::params::ReorderDirection,
    services::{auth_service::AuthGate, cart_service, category_service, order_service, product_service},
    state::AppState,
    store::{ImageStore, Store},
};
use tokio::sync::RwLock;
use uuid::Uuid;

async fn setup_state(dir: &tempfile::TempDir) -> anyhow::Result<AppState> {
    let store = Store::open(dir.path().join("database.json")).await?;
    let images = ImageStore::open(dir.path().join("images.json")).await?;
    Ok(AppState {
        store: Arc::new(store),
        images: Arc::new(images),
        carts: Arc::new(RwLock::new(HashMap::new())),
        auth: Arc::new(AuthGate::new("admin", "babyshop123", 24)),
    })
}

fn product_request(name: &str, price: Decimal) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        description: String::new(),
        price,
        original_price: None,
        sale_price: None,
        image: "/api/images/placeholder".to_string(),
        category: "Clothing".to_string(),
        rating: 4.5,
        brand: Some("TinyTots".to_string()),
        age_ranges: vec!["0-3m".to_string()],
        tags: Vec::new(),
        sku: None,
        material: None,
    }
}

fn shipping_address() -> Address {
    Address {
        line1: "1 Main St".to_string(),
        line2: None,
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        country: "US".to_string(),
    }
}

fn order_request(cart_id: Uuid, email: &str, method: ShippingMethod) -> PlaceOrderRequest {
    PlaceOrderRequest {
        cart_id,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        phone: Some("555-0100".to_string()),
        shipping_address: shipping_address(),
        shipping_method: method,
        payment_method: "card".to_string(),
    }
}

// Storefront flow: seed products, fill a cart, place an order, then verify
// the order snapshot and customer aggregate from the admin side.
#[tokio::test]
async fn checkout_flow_snapshots_order_and_upserts_customer() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(&dir).await?;

    let crib = product_service::create_product(&state, product_request("Crib", Decimal::new(3000, 2)))
        .await?
        .data
        .unwrap();
    let onesie =
        product_service::create_product(&state, product_request("Onesie", Decimal::new(1000, 2)))
            .await?
            .data
            .unwrap();

    let cart_id = Uuid::new_v4();
    cart_service::add_item(&state, cart_id, AddToCartRequest { product_id: crib.id }).await?;
    cart_service::add_item(&state, cart_id, AddToCartRequest { product_id: onesie.id }).await?;

    let order = order_service::place_order(
        &state,
        order_request(cart_id, "Ada@Example.com", ShippingMethod::Standard),
    )
    .await?
    .data
    .unwrap();

    // Subtotal 40.00 qualifies for free standard shipping; tax is 8%.
    assert_eq!(order.subtotal, Decimal::new(4000, 2));
    assert_eq!(order.shipping, Decimal::ZERO);
    assert_eq!(order.tax, Decimal::new(320, 2));
    assert_eq!(order.total, Decimal::new(4320, 2));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.email, "ada@example.com");
    assert!(order.order_number.starts_with("ORD-"));

    // Placement empties the cart.
    let cart = cart_service::get_cart(&state, cart_id).await?.data.unwrap();
    assert!(cart.items.is_empty());

    // A price change after placement must not touch the order snapshot.
    product_service::update_product(
        &state,
        crib.id,
        tinytots_commerce_api::dto::products::UpdateProductRequest {
            price: Some(Decimal::new(9900, 2)),
            ..Default::default()
        },
    )
    .await?;
    let stored = order_service::get_order(&state, order.id).await?.data.unwrap();
    assert_eq!(stored.items[0].price, Decimal::new(3000, 2));
    assert_eq!(stored.total, Decimal::new(4320, 2));

    // Second order from the same email folds into one customer record.
    cart_service::add_item(&state, cart_id, AddToCartRequest { product_id: onesie.id }).await?;
    let second = order_service::place_order(
        &state,
        order_request(cart_id, "ada@example.com", ShippingMethod::Express),
    )
    .await?
    .data
    .unwrap();
    // 10.00 + 9.99 express + 0.80 tax.
    assert_eq!(second.total, Decimal::new(2079, 2));

    let customers = order_service::list_customers(&state).await?.data.unwrap();
    assert_eq!(customers.items.len(), 1);
    let customer = &customers.items[0];
    assert_eq!(customer.total_orders, 2);
    assert_eq!(customer.total_spent, Decimal::new(4320, 2) + Decimal::new(2079, 2));

    // Admin moves the order along.
    let updated = order_service::update_order_status(
        &state,
        order.id,
        UpdateOrderStatusRequest {
            status: OrderStatus::Shipped,
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipped);

    Ok(())
}

#[tokio::test]
async fn placing_order_with_empty_cart_is_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(&dir).await?;

    let result = order_service::place_order(
        &state,
        order_request(Uuid::new_v4(), "ada@example.com", ShippingMethod::Standard),
    )
    .await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn admin_can_correct_and_remove_customer_records() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(&dir).await?;

    let onesie =
        product_service::create_product(&state, product_request("Onesie", Decimal::new(1000, 2)))
            .await?
            .data
            .unwrap();

    let cart_id = Uuid::new_v4();
    cart_service::add_item(&state, cart_id, AddToCartRequest { product_id: onesie.id }).await?;
    order_service::place_order(
        &state,
        order_request(cart_id, "ada@example.com", ShippingMethod::Standard),
    )
    .await?;
    cart_service::add_item(&state, cart_id, AddToCartRequest { product_id: onesie.id }).await?;
    order_service::place_order(
        &state,
        order_request(cart_id, "bob@example.com", ShippingMethod::Standard),
    )
    .await?;

    // Most recent order first.
    let listed = order_service::list_customers(&state).await?.data.unwrap();
    let emails: Vec<_> = listed.items.iter().map(|c| c.email.as_str()).collect();
    assert_eq!(emails, ["bob@example.com", "ada@example.com"]);
    let bob = listed.items[0].clone();
    let ada = listed.items[1].clone();

    // Contact details merge; the email normalizes; aggregates stay put.
    let updated = order_service::update_customer(
        &state,
        bob.id,
        UpdateCustomerRequest {
            first_name: Some("Robert".into()),
            email: Some("Robert@Example.com".into()),
            phone: Some("555-0199".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.first_name, "Robert");
    assert_eq!(updated.email, "robert@example.com");
    assert_eq!(updated.phone.as_deref(), Some("555-0199"));
    assert_eq!(updated.total_orders, bob.total_orders);
    assert_eq!(updated.total_spent, bob.total_spent);

    // Cannot steal another customer's email.
    let clash = order_service::update_customer(
        &state,
        bob.id,
        UpdateCustomerRequest {
            email: Some(ada.email.clone()),
            ..Default::default()
        },
    )
    .await;
    assert!(clash.is_err());

    order_service::delete_customer(&state, bob.id).await?;
    let listed = order_service::list_customers(&state).await?.data.unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].email, "ada@example.com");
    assert!(order_service::get_customer(&state, bob.id).await.is_err());

    Ok(())
}

#[tokio::test]
async fn category_delete_guard_and_reordering() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(&dir).await?;

    let make = |name: &str| CreateCategoryRequest {
        name: name.to_string(),
        icon: None,
        description: None,
        display_order: None,
        active: None,
        parent_category: None,
    };
    let clothing = category_service::create_category(&state, make("Clothing"))
        .await?
        .data
        .unwrap();
    let toys = category_service::create_category(&state, make("Toys"))
        .await?
        .data
        .unwrap();
    category_service::create_category(&state, make("Feeding")).await?;

    // A referenced category cannot be deleted.
    product_service::create_product(&state, product_request("Onesie", Decimal::new(1000, 2)))
        .await?;
    assert!(category_service::delete_category(&state, clothing.id).await.is_err());

    // Moving the second category up swaps it with the first and re-sequences
    // every position to 0..n-1.
    category_service::reorder_category(&state, toys.id, ReorderDirection::Up).await?;
    let listed = category_service::list_categories(&state).await?.data.unwrap();
    let names: Vec<_> = listed.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Toys", "Clothing", "Feeding"]);
    let orders: Vec<_> = listed.items.iter().map(|c| c.display_order).collect();
    assert_eq!(orders, [0, 1, 2]);

    // Top item cannot move further up; order is unchanged.
    category_service::reorder_category(&state, toys.id, ReorderDirection::Up).await?;
    let listed = category_service::list_categories(&state).await?.data.unwrap();
    assert_eq!(listed.items[0].name, "Toys");

    Ok(())
}

#[tokio::test]
async fn documents_survive_a_store_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let state = setup_state(&dir).await?;

    let product =
        product_service::create_product(&state, product_request("Crib", Decimal::new(3000, 2)))
            .await?
            .data
            .unwrap();
    drop(state);

    let reopened = Store::open(dir.path().join("database.json")).await?;
    let found = reopened
        .read(|db| db.products.iter().find(|p| p.id == product.id).cloned())
        .await;
    assert_eq!(found.map(|p| p.name), Some("Crib".to_string()));
    Ok(())
}

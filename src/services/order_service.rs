use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    cart::{Cart, CheckoutTotals},
    dto::orders::{
        CustomerList, OrderList, PlaceOrderRequest, UpdateCustomerRequest,
        UpdateOrderStatusRequest,
    },
    error::{AppError, AppResult},
    models::{Customer, Order, OrderItem, OrderStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

/// Snapshots the session cart into an immutable order, upserts the customer
/// aggregate by email, and clears the cart. Order and customer land in the
/// same document write.
pub async fn place_order(
    state: &AppState,
    payload: PlaceOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("a valid email is required".into()));
    }
    if payload.payment_method.trim().is_empty() {
        return Err(AppError::BadRequest("payment method is required".into()));
    }

    let mut carts = state.carts.write().await;
    let cart = carts
        .get_mut(&payload.cart_id)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("cart is empty".into()))?;

    let now = Utc::now();
    let order = build_order(cart, &payload, email.clone(), now);

    state
        .store
        .write(|db| {
            db.orders.push(order.clone());
            upsert_customer(db, &order, now);
            Ok::<_, AppError>(())
        })
        .await?;

    cart.clear();
    tracing::info!(order_number = %order.order_number, "order placed");

    Ok(ApiResponse::success(
        "Order placed",
        order,
        Some(Meta::empty()),
    ))
}

fn build_order(
    cart: &Cart,
    payload: &PlaceOrderRequest,
    email: String,
    now: DateTime<Utc>,
) -> Order {
    let items: Vec<OrderItem> = cart
        .items
        .iter()
        .map(|line| OrderItem {
            product_id: line.product_id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            image: line.image.clone(),
        })
        .collect();

    let totals = CheckoutTotals::derive(cart.subtotal(), payload.shipping_method);
    let id = Uuid::new_v4();

    Order {
        id,
        order_number: build_order_number(id, now),
        first_name: payload.first_name.clone(),
        last_name: payload.last_name.clone(),
        email,
        phone: payload.phone.clone(),
        shipping_address: payload.shipping_address.clone(),
        items,
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        shipping_method: payload.shipping_method,
        payment_method: payload.payment_method.clone(),
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

fn upsert_customer(db: &mut crate::store::Database, order: &Order, now: DateTime<Utc>) {
    match db.customers.iter_mut().find(|c| c.email == order.email) {
        Some(customer) => {
            customer.first_name = order.first_name.clone();
            customer.last_name = order.last_name.clone();
            customer.phone = order.phone.clone();
            customer.address = Some(order.shipping_address.clone());
            customer.total_orders += 1;
            customer.total_spent += order.total;
            customer.last_order_date = Some(now);
        }
        None => db.customers.push(Customer {
            id: Uuid::new_v4(),
            first_name: order.first_name.clone(),
            last_name: order.last_name.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            address: Some(order.shipping_address.clone()),
            total_orders: 1,
            total_spent: order.total,
            last_order_date: Some(now),
            created_at: now,
        }),
    }
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let status = query.status;
    let mut items = state
        .store
        .read(|db| {
            db.orders
                .iter()
                .filter(|o| status.is_none_or(|s| o.status == s))
                .cloned()
                .collect::<Vec<_>>()
        })
        .await;

    match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => items.sort_by_key(|o| o.created_at),
        SortOrder::Desc => items.sort_by_key(|o| std::cmp::Reverse(o.created_at)),
    }

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(meta),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Order>> {
    let order = state
        .store
        .read(|db| db.orders.iter().find(|o| o.id == id).cloned())
        .await;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Order", order, None))
}

/// Status is the only field an admin can touch after placement; the item
/// snapshot and totals are never recomputed.
pub async fn update_order_status(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let order = state
        .store
        .write(|db| {
            let order = db
                .orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or(AppError::NotFound)?;
            order.status = payload.status;
            order.updated_at = Utc::now();
            Ok::<_, AppError>(order.clone())
        })
        .await?;

    tracing::info!(order_number = %order.order_number, status = ?order.status, "order status updated");
    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn list_customers(state: &AppState) -> AppResult<ApiResponse<CustomerList>> {
    let mut items = state.store.read(|db| db.customers.clone()).await;
    // Most recent order first; customers who never ordered sort last.
    items.sort_by_key(|c| std::cmp::Reverse(c.last_order_date));
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Customers",
        CustomerList { items },
        Some(meta),
    ))
}

pub async fn get_customer(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Customer>> {
    let customer = state
        .store
        .read(|db| db.customers.iter().find(|c| c.id == id).cloned())
        .await;
    let customer = match customer {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Customer", customer, None))
}

/// Admin correction of contact details; the order-derived aggregates
/// (totalOrders, totalSpent, lastOrderDate) are not editable.
pub async fn update_customer(
    state: &AppState,
    id: Uuid,
    payload: UpdateCustomerRequest,
) -> AppResult<ApiResponse<Customer>> {
    let email = match payload.email {
        Some(email) => {
            let email = email.trim().to_lowercase();
            if email.is_empty() || !email.contains('@') {
                return Err(AppError::BadRequest("a valid email is required".into()));
            }
            Some(email)
        }
        None => None,
    };

    let customer = state
        .store
        .write(|db| {
            if let Some(email) = email.as_deref()
                && db.customers.iter().any(|c| c.email == email && c.id != id)
            {
                return Err(AppError::BadRequest(format!(
                    "email '{email}' already belongs to another customer"
                )));
            }

            let customer = db
                .customers
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(AppError::NotFound)?;

            if let Some(first_name) = payload.first_name {
                customer.first_name = first_name;
            }
            if let Some(last_name) = payload.last_name {
                customer.last_name = last_name;
            }
            if let Some(email) = email {
                customer.email = email;
            }
            if let Some(phone) = payload.phone {
                customer.phone = Some(phone);
            }
            if let Some(address) = payload.address {
                customer.address = Some(address);
            }
            Ok(customer.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Updated",
        customer,
        Some(Meta::empty()),
    ))
}

pub async fn delete_customer(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .store
        .write(|db| {
            let pos = db
                .customers
                .iter()
                .position(|c| c.id == id)
                .ok_or(AppError::NotFound)?;
            db.customers.remove(pos);
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn build_order_number(order_id: Uuid, now: DateTime<Utc>) -> String {
    let date = now.format("%Y%m%d");
    let suffix = order_id.to_string();
    let short = &suffix[..8];
    format!("ORD-{}-{}", date, short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_number_embeds_date_and_id_prefix() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let number = build_order_number(id, now);
        assert!(number.starts_with(&format!("ORD-{}-", now.format("%Y%m%d"))));
        assert!(id.to_string().starts_with(number.rsplit('-').next().unwrap()));
    }
}

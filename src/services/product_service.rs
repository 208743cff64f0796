use chrono::Utc;
use uuid::Uuid;

use crate::{
    catalog,
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::ProductQuery,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let sort = query.sort.unwrap_or_default();
    let criteria = query.into_criteria();
    let items = state
        .store
        .read(|db| catalog::filter_and_sort(&db.products, &criteria, sort))
        .await;

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let result = state
        .store
        .read(|db| db.products.iter().find(|p| p.id == id).cloned())
        .await;
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }
    if payload.image.trim().is_empty() {
        return Err(AppError::BadRequest("image is required".into()));
    }

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        name: payload.name,
        description: payload.description,
        price: payload.price,
        original_price: payload.original_price,
        sale_price: payload.sale_price,
        image: payload.image,
        category: payload.category,
        rating: payload.rating,
        brand: payload.brand,
        age_ranges: payload.age_ranges,
        tags: payload.tags,
        sku: payload.sku,
        material: payload.material,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .write(|db| {
            db.products.push(product.clone());
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let product = state
        .store
        .write(|db| {
            let product = db
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(AppError::NotFound)?;

            if let Some(name) = payload.name {
                product.name = name;
            }
            if let Some(description) = payload.description {
                product.description = description;
            }
            if let Some(price) = payload.price {
                product.price = price;
            }
            if let Some(original_price) = payload.original_price {
                product.original_price = Some(original_price);
            }
            if let Some(sale_price) = payload.sale_price {
                product.sale_price = Some(sale_price);
            }
            if let Some(image) = payload.image {
                product.image = image;
            }
            if let Some(category) = payload.category {
                product.category = category;
            }
            if let Some(rating) = payload.rating {
                product.rating = rating;
            }
            if let Some(brand) = payload.brand {
                product.brand = Some(brand);
            }
            if let Some(age_ranges) = payload.age_ranges {
                product.age_ranges = age_ranges;
            }
            if let Some(tags) = payload.tags {
                product.tags = tags;
            }
            if let Some(sku) = payload.sku {
                product.sku = Some(sku);
            }
            if let Some(material) = payload.material {
                product.material = Some(material);
            }
            product.updated_at = Utc::now();
            Ok::<_, AppError>(product.clone())
        })
        .await?;

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .store
        .write(|db| {
            let pos = db
                .products
                .iter()
                .position(|p| p.id == id)
                .ok_or(AppError::NotFound)?;
            db.products.remove(pos);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(product_id = %id, "product deleted");
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

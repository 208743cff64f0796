use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Category, default_display_order},
    response::{ApiResponse, Meta},
    routes::categories::{CategoryList, CreateCategoryRequest, UpdateCategoryRequest},
    routes::params::ReorderDirection,
    state::AppState,
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let mut items = state.store.read(|db| db.categories.clone()).await;
    items.sort_by_key(|c| c.display_order);
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

pub async fn create_category(
    state: &AppState,
    payload: CreateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }

    let now = Utc::now();
    let category = Category {
        id: Uuid::new_v4(),
        name: payload.name,
        icon: payload.icon.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        display_order: payload.display_order.unwrap_or_else(default_display_order),
        active: payload.active.unwrap_or(true),
        parent_category: payload.parent_category,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .write(|db| {
            db.categories.push(category.clone());
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Category created",
        category,
        Some(Meta::empty()),
    ))
}

pub async fn update_category(
    state: &AppState,
    id: Uuid,
    payload: UpdateCategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    let category = state
        .store
        .write(|db| {
            let category = db
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(AppError::NotFound)?;

            if let Some(name) = payload.name {
                category.name = name;
            }
            if let Some(icon) = payload.icon {
                category.icon = icon;
            }
            if let Some(description) = payload.description {
                category.description = description;
            }
            if let Some(display_order) = payload.display_order {
                category.display_order = display_order;
            }
            if let Some(active) = payload.active {
                category.active = active;
            }
            if let Some(parent_category) = payload.parent_category {
                category.parent_category = Some(parent_category);
            }
            category.updated_at = Utc::now();
            Ok::<_, AppError>(category.clone())
        })
        .await?;

    Ok(ApiResponse::success("Updated", category, Some(Meta::empty())))
}

/// Deleting a category still referenced by products (matched by name) is
/// refused with a user-facing message.
pub async fn delete_category(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .store
        .write(|db| {
            let pos = db
                .categories
                .iter()
                .position(|c| c.id == id)
                .ok_or(AppError::NotFound)?;

            let name = db.categories[pos].name.clone();
            let in_use = db.products.iter().filter(|p| p.category == name).count();
            if in_use > 0 {
                return Err(AppError::BadRequest(format!(
                    "cannot delete category '{name}': {in_use} product(s) still reference it"
                )));
            }
            db.categories.remove(pos);
            Ok(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_category_active(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Category>> {
    let category = state
        .store
        .write(|db| {
            let category = db
                .categories
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(AppError::NotFound)?;
            category.active = !category.active;
            category.updated_at = Utc::now();
            Ok::<_, AppError>(category.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Toggled",
        category,
        Some(Meta::empty()),
    ))
}

/// Moves the category one slot in the ordered view, then re-sequences the
/// whole collection 0..N-1 so repeated moves cannot desynchronize ordering.
pub async fn reorder_category(
    state: &AppState,
    id: Uuid,
    direction: ReorderDirection,
) -> AppResult<ApiResponse<Category>> {
    let category = state
        .store
        .write(|db| {
            db.categories.sort_by_key(|c| c.display_order);
            let idx = db
                .categories
                .iter()
                .position(|c| c.id == id)
                .ok_or(AppError::NotFound)?;

            let target = match direction {
                ReorderDirection::Up if idx > 0 => idx - 1,
                ReorderDirection::Down if idx + 1 < db.categories.len() => idx + 1,
                _ => idx,
            };
            db.categories.swap(idx, target);

            let now = Utc::now();
            for (i, c) in db.categories.iter_mut().enumerate() {
                c.display_order = i as i32;
                c.updated_at = now;
            }
            Ok::<_, AppError>(db.categories[target].clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Reordered",
        category,
        Some(Meta::empty()),
    ))
}

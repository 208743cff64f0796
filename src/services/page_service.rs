use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Page,
    response::{ApiResponse, Meta},
    routes::pages::{CreatePageRequest, PageList, UpdatePageRequest},
    state::AppState,
};

pub async fn list_pages(state: &AppState) -> AppResult<ApiResponse<PageList>> {
    let items = state.store.read(|db| db.pages.clone()).await;
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Pages", PageList { items }, Some(meta)))
}

pub async fn get_page(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Page>> {
    let page = state
        .store
        .read(|db| db.pages.iter().find(|p| p.id == id).cloned())
        .await;
    let page = match page {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Page", page, None))
}

pub async fn create_page(
    state: &AppState,
    payload: CreatePageRequest,
) -> AppResult<ApiResponse<Page>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".into()));
    }
    if payload.slug.trim().is_empty() {
        return Err(AppError::BadRequest("slug is required".into()));
    }

    let now = Utc::now();
    let page = Page {
        id: Uuid::new_v4(),
        title: payload.title,
        slug: payload.slug,
        content: payload.content.unwrap_or_default(),
        is_active: payload.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .write(|db| {
            if db.pages.iter().any(|p| p.slug == page.slug) {
                return Err(AppError::BadRequest(format!(
                    "slug '{}' is already in use",
                    page.slug
                )));
            }
            db.pages.push(page.clone());
            Ok(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Page created",
        page,
        Some(Meta::empty()),
    ))
}

pub async fn update_page(
    state: &AppState,
    id: Uuid,
    payload: UpdatePageRequest,
) -> AppResult<ApiResponse<Page>> {
    let page = state
        .store
        .write(|db| {
            if let Some(slug) = payload.slug.as_deref()
                && db.pages.iter().any(|p| p.slug == slug && p.id != id)
            {
                return Err(AppError::BadRequest(format!(
                    "slug '{slug}' is already in use"
                )));
            }

            let page = db
                .pages
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(AppError::NotFound)?;

            if let Some(title) = payload.title {
                page.title = title;
            }
            if let Some(slug) = payload.slug {
                page.slug = slug;
            }
            if let Some(content) = payload.content {
                page.content = content;
            }
            if let Some(is_active) = payload.is_active {
                page.is_active = is_active;
            }
            page.updated_at = Utc::now();
            Ok(page.clone())
        })
        .await?;

    Ok(ApiResponse::success("Updated", page, Some(Meta::empty())))
}

pub async fn delete_page(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .store
        .write(|db| {
            let pos = db
                .pages
                .iter()
                .position(|p| p.id == id)
                .ok_or(AppError::NotFound)?;
            db.pages.remove(pos);
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

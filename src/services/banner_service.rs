use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Banner,
    response::{ApiResponse, Meta},
    routes::banners::{BannerList, BannerListQuery, CreateBannerRequest, UpdateBannerRequest},
    routes::params::ReorderDirection,
    state::AppState,
};

pub async fn list_banners(
    state: &AppState,
    query: BannerListQuery,
) -> AppResult<ApiResponse<BannerList>> {
    let mut items = state
        .store
        .read(|db| {
            db.banners
                .iter()
                .filter(|b| query.banner_type.is_none_or(|t| b.banner_type == t))
                .filter(|b| !query.active_only.unwrap_or(false) || b.is_active)
                .cloned()
                .collect::<Vec<_>>()
        })
        .await;
    items.sort_by_key(|b| b.position);

    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Banners",
        BannerList { items },
        Some(meta),
    ))
}

pub async fn create_banner(
    state: &AppState,
    payload: CreateBannerRequest,
) -> AppResult<ApiResponse<Banner>> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".into()));
    }
    if payload.image.trim().is_empty() {
        return Err(AppError::BadRequest("image is required".into()));
    }

    let now = Utc::now();
    let banner = Banner {
        id: Uuid::new_v4(),
        title: payload.title,
        subtitle: payload.subtitle,
        image: payload.image,
        link: payload.link,
        banner_type: payload.banner_type,
        position: payload.position.unwrap_or_default(),
        is_active: payload.is_active.unwrap_or(true),
        start_date: payload.start_date,
        end_date: payload.end_date,
        button_text: payload.button_text,
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .write(|db| {
            db.banners.push(banner.clone());
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Banner created",
        banner,
        Some(Meta::empty()),
    ))
}

pub async fn update_banner(
    state: &AppState,
    id: Uuid,
    payload: UpdateBannerRequest,
) -> AppResult<ApiResponse<Banner>> {
    let banner = state
        .store
        .write(|db| {
            let banner = db
                .banners
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or(AppError::NotFound)?;

            if let Some(title) = payload.title {
                banner.title = title;
            }
            if let Some(subtitle) = payload.subtitle {
                banner.subtitle = Some(subtitle);
            }
            if let Some(image) = payload.image {
                banner.image = image;
            }
            if let Some(link) = payload.link {
                banner.link = Some(link);
            }
            if let Some(banner_type) = payload.banner_type {
                banner.banner_type = banner_type;
            }
            if let Some(position) = payload.position {
                banner.position = position;
            }
            if let Some(is_active) = payload.is_active {
                banner.is_active = is_active;
            }
            if let Some(start_date) = payload.start_date {
                banner.start_date = Some(start_date);
            }
            if let Some(end_date) = payload.end_date {
                banner.end_date = Some(end_date);
            }
            if let Some(button_text) = payload.button_text {
                banner.button_text = Some(button_text);
            }
            banner.updated_at = Utc::now();
            Ok::<_, AppError>(banner.clone())
        })
        .await?;

    Ok(ApiResponse::success("Updated", banner, Some(Meta::empty())))
}

pub async fn delete_banner(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .store
        .write(|db| {
            let pos = db
                .banners
                .iter()
                .position(|b| b.id == id)
                .ok_or(AppError::NotFound)?;
            db.banners.remove(pos);
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_banner_active(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Banner>> {
    let banner = state
        .store
        .write(|db| {
            let banner = db
                .banners
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or(AppError::NotFound)?;
            banner.is_active = !banner.is_active;
            banner.updated_at = Utc::now();
            Ok::<_, AppError>(banner.clone())
        })
        .await?;

    Ok(ApiResponse::success("Toggled", banner, Some(Meta::empty())))
}

pub async fn reorder_banner(
    state: &AppState,
    id: Uuid,
    direction: ReorderDirection,
) -> AppResult<ApiResponse<Banner>> {
    let banner = state
        .store
        .write(|db| {
            db.banners.sort_by_key(|b| b.position);
            let idx = db
                .banners
                .iter()
                .position(|b| b.id == id)
                .ok_or(AppError::NotFound)?;

            let target = match direction {
                ReorderDirection::Up if idx > 0 => idx - 1,
                ReorderDirection::Down if idx + 1 < db.banners.len() => idx + 1,
                _ => idx,
            };
            db.banners.swap(idx, target);

            let now = Utc::now();
            for (i, b) in db.banners.iter_mut().enumerate() {
                b.position = i as i32;
                b.updated_at = now;
            }
            Ok::<_, AppError>(db.banners[target].clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Reordered",
        banner,
        Some(Meta::empty()),
    ))
}

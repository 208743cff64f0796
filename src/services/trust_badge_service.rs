use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::TrustBadge,
    response::{ApiResponse, Meta},
    routes::params::ReorderDirection,
    routes::trust_badges::{CreateTrustBadgeRequest, TrustBadgeList, UpdateTrustBadgeRequest},
    state::AppState,
};

pub async fn list_trust_badges(state: &AppState) -> AppResult<ApiResponse<TrustBadgeList>> {
    let mut items = state.store.read(|db| db.trust_badges.clone()).await;
    items.sort_by_key(|b| b.position);
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success(
        "Trust badges",
        TrustBadgeList { items },
        Some(meta),
    ))
}

pub async fn create_trust_badge(
    state: &AppState,
    payload: CreateTrustBadgeRequest,
) -> AppResult<ApiResponse<TrustBadge>> {
    if payload.text.trim().is_empty() {
        return Err(AppError::BadRequest("text is required".into()));
    }

    let now = Utc::now();
    let badge = TrustBadge {
        id: Uuid::new_v4(),
        text: payload.text,
        icon: payload.icon,
        border_color: payload.border_color.unwrap_or_else(|| "#e2e8f0".into()),
        position: payload.position.unwrap_or_default(),
        is_active: payload.is_active.unwrap_or(true),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .write(|db| {
            db.trust_badges.push(badge.clone());
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Trust badge created",
        badge,
        Some(Meta::empty()),
    ))
}

pub async fn update_trust_badge(
    state: &AppState,
    id: Uuid,
    payload: UpdateTrustBadgeRequest,
) -> AppResult<ApiResponse<TrustBadge>> {
    let badge = state
        .store
        .write(|db| {
            let badge = db
                .trust_badges
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or(AppError::NotFound)?;

            if let Some(text) = payload.text {
                badge.text = text;
            }
            if let Some(icon) = payload.icon {
                badge.icon = Some(icon);
            }
            if let Some(border_color) = payload.border_color {
                badge.border_color = border_color;
            }
            if let Some(position) = payload.position {
                badge.position = position;
            }
            if let Some(is_active) = payload.is_active {
                badge.is_active = is_active;
            }
            badge.updated_at = Utc::now();
            Ok::<_, AppError>(badge.clone())
        })
        .await?;

    Ok(ApiResponse::success("Updated", badge, Some(Meta::empty())))
}

pub async fn delete_trust_badge(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .store
        .write(|db| {
            let pos = db
                .trust_badges
                .iter()
                .position(|b| b.id == id)
                .ok_or(AppError::NotFound)?;
            db.trust_badges.remove(pos);
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_trust_badge_active(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<TrustBadge>> {
    let badge = state
        .store
        .write(|db| {
            let badge = db
                .trust_badges
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or(AppError::NotFound)?;
            badge.is_active = !badge.is_active;
            badge.updated_at = Utc::now();
            Ok::<_, AppError>(badge.clone())
        })
        .await?;

    Ok(ApiResponse::success("Toggled", badge, Some(Meta::empty())))
}

pub async fn reorder_trust_badge(
    state: &AppState,
    id: Uuid,
    direction: ReorderDirection,
) -> AppResult<ApiResponse<TrustBadge>> {
    let badge = state
        .store
        .write(|db| {
            db.trust_badges.sort_by_key(|b| b.position);
            let idx = db
                .trust_badges
                .iter()
                .position(|b| b.id == id)
                .ok_or(AppError::NotFound)?;

            let target = match direction {
                ReorderDirection::Up if idx > 0 => idx - 1,
                ReorderDirection::Down if idx + 1 < db.trust_badges.len() => idx + 1,
                _ => idx,
            };
            db.trust_badges.swap(idx, target);

            let now = Utc::now();
            for (i, b) in db.trust_badges.iter_mut().enumerate() {
                b.position = i as i32;
                b.updated_at = now;
            }
            Ok::<_, AppError>(db.trust_badges[target].clone())
        })
        .await?;

    Ok(ApiResponse::success("Reordered", badge, Some(Meta::empty())))
}

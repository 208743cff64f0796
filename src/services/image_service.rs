use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::StoredImage,
    response::{ApiResponse, Meta},
    routes::images::{ImageStored, StoreImageRequest},
    state::AppState,
};

pub async fn store_image(
    state: &AppState,
    payload: StoreImageRequest,
) -> AppResult<ApiResponse<ImageStored>> {
    if payload.content_type.trim().is_empty() {
        return Err(AppError::BadRequest("contentType is required".into()));
    }
    // Reject garbage up front; the stored string must decode on the way out.
    let decoded = BASE64
        .decode(payload.data.as_bytes())
        .map_err(|_| AppError::BadRequest("data is not valid base64".into()))?;
    if decoded.is_empty() {
        return Err(AppError::BadRequest("data is empty".into()));
    }

    let image = StoredImage {
        id: Uuid::new_v4(),
        content_type: payload.content_type,
        data: payload.data,
        created_at: Utc::now(),
    };

    state
        .images
        .write(|db| {
            db.images.push(image.clone());
            Ok::<_, AppError>(())
        })
        .await?;

    let stored = ImageStored {
        id: image.id,
        url: format!("/api/images/{}", image.id),
    };
    Ok(ApiResponse::success(
        "Image stored",
        stored,
        Some(Meta::empty()),
    ))
}

/// Returns the decoded bytes and content type for streaming.
pub async fn get_image(state: &AppState, id: Uuid) -> AppResult<(String, Vec<u8>)> {
    let image = state
        .images
        .read(|db| db.images.iter().find(|i| i.id == id).cloned())
        .await;
    let image = match image {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    let bytes = BASE64
        .decode(image.data.as_bytes())
        .map_err(|err| AppError::Internal(anyhow::anyhow!("stored image is corrupt: {err}")))?;
    Ok((image.content_type, bytes))
}

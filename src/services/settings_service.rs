use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{AppSettings, FooterSettings},
    response::{ApiResponse, Meta},
    routes::settings::{UpdateFooterRequest, UpdateSettingsRequest},
    state::AppState,
};

pub async fn get_footer(state: &AppState) -> AppResult<ApiResponse<FooterSettings>> {
    let footer = state.store.read(|db| db.footer.clone()).await;
    Ok(ApiResponse::success("Footer", footer, None))
}

/// Footer content is replaced wholesale; the admin screen edits the whole
/// block at once.
pub async fn update_footer(
    state: &AppState,
    payload: UpdateFooterRequest,
) -> AppResult<ApiResponse<FooterSettings>> {
    let footer = state
        .store
        .write(|db| {
            db.footer = FooterSettings {
                tagline: payload.tagline,
                copyright: payload.copyright,
                columns: payload.columns,
                updated_at: Utc::now(),
            };
            Ok::<_, AppError>(db.footer.clone())
        })
        .await?;

    Ok(ApiResponse::success("Updated", footer, Some(Meta::empty())))
}

pub async fn get_settings(state: &AppState) -> AppResult<ApiResponse<AppSettings>> {
    let settings = state.store.read(|db| db.settings.clone()).await;
    Ok(ApiResponse::success("Settings", settings, None))
}

pub async fn update_settings(
    state: &AppState,
    payload: UpdateSettingsRequest,
) -> AppResult<ApiResponse<AppSettings>> {
    let settings = state
        .store
        .write(|db| {
            if let Some(store_name) = payload.store_name {
                db.settings.store_name = store_name;
            }
            if let Some(currency) = payload.currency {
                db.settings.currency = currency;
            }
            if let Some(tax_rate) = payload.tax_rate {
                db.settings.tax_rate = tax_rate;
            }
            if let Some(support_email) = payload.support_email {
                db.settings.support_email = support_email;
            }
            db.settings.updated_at = Utc::now();
            Ok::<_, AppError>(db.settings.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Updated",
        settings,
        Some(Meta::empty()),
    ))
}

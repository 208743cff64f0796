use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    cart::Cart,
    config::AppConfig,
    services::auth_service::AuthGate,
    store::{ImageStore, Store},
};

/// Explicit application context built once at startup and passed by
/// reference, instead of module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub images: Arc<ImageStore>,
    /// Session carts, keyed by a client-chosen cart id. Never persisted;
    /// they live and die with the process like a browser session.
    pub carts: Arc<RwLock<HashMap<Uuid, Cart>>>,
    pub auth: Arc<AuthGate>,
}

impl AppState {
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&config.data_dir).await?;
        let store = Store::open(config.database_path()).await?;
        let images = ImageStore::open(config.images_path()).await?;
        Ok(Self {
            store: Arc::new(store),
            images: Arc::new(images),
            carts: Arc::new(RwLock::new(HashMap::new())),
            auth: Arc::new(AuthGate::new(
                &config.admin_username,
                &config.admin_password,
                config.session_ttl_hours,
            )),
        })
    }
}

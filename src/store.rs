use std::path::PathBuf;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::{fs, sync::RwLock};

use crate::models::{
    AppSettings, Banner, Category, Customer, FooterSettings, Order, Page, Product, StoredImage,
    TrustBadge,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Top-level document persisted to `database.json`: one array per
/// collection plus the two singleton settings objects. No schema versioning.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub banners: Vec<Banner>,
    pub trust_badges: Vec<TrustBadge>,
    pub pages: Vec<Page>,
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub footer: FooterSettings,
    pub settings: AppSettings,
}

/// Document persisted to `images.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageDatabase {
    pub images: Vec<StoredImage>,
}

/// A whole-document JSON store: every mutation reads, edits, and rewrites
/// the file. Last writer wins across processes; within this process the
/// RwLock serializes writers, so each mutation lands atomically.
pub struct JsonStore<D> {
    path: PathBuf,
    db: RwLock<D>,
}

pub type Store = JsonStore<Database>;
pub type ImageStore = JsonStore<ImageDatabase>;

impl<D> JsonStore<D>
where
    D: Default + Serialize + DeserializeOwned,
{
    /// Load the document, or start from an empty one when the file does not
    /// exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let db = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => D::default(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            db: RwLock::new(db),
        })
    }

    pub async fn read<T>(&self, f: impl FnOnce(&D) -> T) -> T {
        let db = self.db.read().await;
        f(&db)
    }

    /// Apply a mutation and rewrite the whole file. A failed rewrite leaves
    /// the in-memory document ahead of the file until the next successful
    /// write; nothing is retried.
    pub async fn write<T, E>(&self, f: impl FnOnce(&mut D) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut db = self.db.write().await;
        let out = f(&mut db)?;
        let bytes = serde_json::to_vec_pretty(&*db)
            .map_err(StoreError::from)
            .map_err(E::from)?;
        fs::write(&self.path, bytes)
            .await
            .map_err(StoreError::from)
            .map_err(E::from)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn sample_page() -> Page {
        let now = Utc::now();
        Page {
            id: Uuid::new_v4(),
            title: "About Us".into(),
            slug: "about-us".into(),
            content: "We sell baby things.".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("database.json")).await.unwrap();
        let count = store.read(|db| db.products.len()).await;
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn write_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database.json");

        let store = Store::open(&path).await.unwrap();
        let page = sample_page();
        store
            .write(|db| {
                db.pages.push(page.clone());
                db.settings.tax_rate = Decimal::new(10, 2);
                Ok::<_, StoreError>(())
            })
            .await
            .unwrap();

        let reloaded = Store::open(&path).await.unwrap();
        let (slugs, rate) = reloaded
            .read(|db| {
                (
                    db.pages.iter().map(|p| p.slug.clone()).collect::<Vec<_>>(),
                    db.settings.tax_rate,
                )
            })
            .await;
        assert_eq!(slugs, vec!["about-us".to_string()]);
        assert_eq!(rate, Decimal::new(10, 2));
    }
}

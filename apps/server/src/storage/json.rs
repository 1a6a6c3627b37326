use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::SiteStore;
use crate::models::Site;

/// One JSON file per user collection under the data directory.
///
/// Durability is best-effort read-modify-write; a missing file is an empty
/// collection.
pub struct JsonStore {
    data_dir: PathBuf,
    // Serializes read-modify-write cycles so concurrent registrations
    // cannot drop each other's writes.
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;
        Ok(Self { data_dir, write_lock: Mutex::new(()) })
    }

    /// Collection file for a user key. The key arrives from a request
    /// header, so anything outside a conservative alphabet is mapped away
    /// before it can reach the filesystem.
    fn user_path(&self, user: &str) -> PathBuf {
        let safe: String = user
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') { c } else { '_' })
            .collect();
        let safe = if safe.is_empty() { "default".to_string() } else { safe };
        self.data_dir.join(format!("{safe}.json"))
    }

    async fn read_sites(&self, path: &Path) -> Result<Vec<Site>> {
        match fs::read_to_string(path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parsing site collection {}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => {
                Err(err).with_context(|| format!("reading site collection {}", path.display()))
            }
        }
    }

    async fn write_sites(&self, path: &Path, sites: &[Site]) -> Result<()> {
        let raw = serde_json::to_string_pretty(sites)?;
        fs::write(path, raw)
            .await
            .with_context(|| format!("writing site collection {}", path.display()))
    }
}

#[async_trait]
impl SiteStore for JsonStore {
    async fn list(&self, user: &str) -> Result<Vec<Site>> {
        self.read_sites(&self.user_path(user)).await
    }

    async fn add(&self, user: &str, url: String, name: String) -> Result<Site> {
        let _guard = self.write_lock.lock().await;

        let path = self.user_path(user);
        let mut sites = self.read_sites(&path).await?;
        let site = Site { id: Uuid::new_v4(), url, name };
        sites.push(site.clone());
        self.write_sites(&path, &sites).await?;

        debug!(user, site = %site.id, "site registered");
        Ok(site)
    }

    async fn remove(&self, user: &str, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().await;

        let path = self.user_path(user);
        let mut sites = self.read_sites(&path).await?;
        let before = sites.len();
        sites.retain(|site| site.id != id);

        let removed = sites.len() != before;
        if removed {
            self.write_sites(&path, &sites).await?;
            debug!(user, site = %id, "site removed");
        }
        Ok(removed)
    }
}

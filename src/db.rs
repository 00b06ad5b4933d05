use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    pub response: String,
    pub timestamp: String,
}

/// subject -> step (as string) -> entry
pub type ResponseStore = BTreeMap<String, BTreeMap<String, CacheEntry>>;

type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Flat-file cache of generated guide steps. The whole document is read on
/// every lookup and rewritten on every save.
#[derive(Clone)]
pub struct ResponseCache {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl ResponseCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable files yield an empty store.
    pub async fn load(&self) -> ResponseStore {
        match self.try_load().await {
            Ok(store) => store,
            Err(e) => {
                error!("Error loading responses from {}: {}", self.path.display(), e);
                ResponseStore::new()
            }
        }
    }

    async fn try_load(&self) -> Result<ResponseStore, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ResponseStore::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    pub async fn get(&self, subject: &str, step: u32) -> Option<String> {
        let mut store = self.load().await;
        store
            .get_mut(subject)
            .and_then(|steps| steps.remove(&step.to_string()))
            .map(|entry| entry.response)
    }

    /// Best effort: a failed write is logged and otherwise ignored.
    pub async fn save(&self, subject: &str, step: u32, response: &str) {
        let _guard = self.write_lock.lock().await;
        match self.try_save(subject, step, response).await {
            Ok(()) => info!("Saved response for {} step {}", subject, step),
            Err(e) => error!("Error saving response for {} step {}: {}", subject, step, e),
        }
    }

    async fn try_save(&self, subject: &str, step: u32, response: &str) -> Result<(), StoreError> {
        let mut store = self.load().await;
        store.entry(subject.to_string()).or_default().insert(
            step.to_string(),
            CacheEntry {
                response: response.to_string(),
                timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            },
        );

        let body = serde_json::to_string_pretty(&store)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, body).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }

    /// Sibling file the store is written to before being renamed into place.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

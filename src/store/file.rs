//! File-backed host store.
//!
//! The file holds a JSON object; the host list lives under a single key
//! (`"hosts"` by default) so the file can be shared with other keys.
//! Writes go to a sibling temp file which is then renamed over the original.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::store::{HostStore, StoreError, StoreResult};

/// Host store persisted as a JSON file.
#[derive(Debug)]
pub struct FileHostStore {
    path: PathBuf,
    key: String,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileHostStore {
    /// Open a store at `path`, creating the parent directory if needed.
    pub async fn init(path: impl Into<PathBuf>, key: impl Into<String>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| io_error(parent, source))?;
        }

        tracing::debug!(path = %path.display(), "Host store initialized");

        Ok(Self {
            path,
            key: key.into(),
            write_lock: Mutex::new(()),
        })
    }

    /// Open the store described by `config`.
    pub async fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        Self::init(&config.path, config.key.clone()).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> StoreResult<Map<String, Value>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(io_error(&self.path, e)),
        };
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }
}

#[async_trait]
impl HostStore for FileHostStore {
    async fn load(&self) -> StoreResult<Vec<String>> {
        let mut document = self.read_document().await?;
        match document.remove(&self.key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }

    async fn save(&self, hosts: &[String]) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        // An unreadable document is replaced rather than blocking the write
        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(StoreError::Corrupt { .. }) => Map::new(),
            Err(e) => return Err(e),
        };
        document.insert(
            self.key.clone(),
            Value::Array(hosts.iter().cloned().map(Value::String).collect()),
        );

        let body = serde_json::to_vec_pretty(&Value::Object(document)).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).await.map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), hosts = hosts.len(), "Saved remembered hosts");
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

//! In-memory host store.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use crate::store::{HostStore, StoreResult};

/// Host store kept in process memory.
///
/// Clones share the same underlying list.
#[derive(Debug, Clone, Default)]
pub struct MemoryHostStore {
    hosts: Arc<Mutex<Option<Vec<String>>>>,
}

impl MemoryHostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already remembers `hosts`.
    pub fn with_hosts<I, T>(hosts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let hosts = hosts.into_iter().map(Into::into).collect();
        Self {
            hosts: Arc::new(Mutex::new(Some(hosts))),
        }
    }

    /// Current value, `None` if never saved.
    pub fn snapshot(&self) -> Option<Vec<String>> {
        match self.hosts.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl HostStore for MemoryHostStore {
    async fn load(&self) -> StoreResult<Vec<String>> {
        Ok(self.snapshot().unwrap_or_default())
    }

    async fn save(&self, hosts: &[String]) -> StoreResult<()> {
        let mut guard = match self.hosts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(hosts.to_vec());
        Ok(())
    }
}

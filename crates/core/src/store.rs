//! Pluggable key-value storage for the persisted session

use crate::CoreResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Durable key-value capability backing the session.
///
/// The guard is the only writer; implementations only need string get/set
/// semantics (the browser-local-storage contract).
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;
    async fn remove(&self, key: &str) -> CoreResult<()>;
}

/// In-memory store, the default and the one tests use
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// File-backed store: a single JSON object on disk.
///
/// The durable analogue of browser local storage for native embedders.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the file.
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    async fn load(&self) -> CoreResult<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::session::SessionHandle;
    use std::sync::Arc;

    #[tokio::test]
    async fn store_errors_surface_through_the_handle() {
        let mut store = mock::MockSessionStore::new();
        store
            .expect_get()
            .returning(|_| Err(CoreError::io_error("disk gone")));
        let session = SessionHandle::new(Arc::new(store));
        assert!(session.refresh_token().await.is_err());
    }

    #[tokio::test]
    async fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("accessToken").await.unwrap(), None);

        store.set("accessToken", "abc").await.unwrap();
        assert_eq!(
            store.get("accessToken").await.unwrap(),
            Some("abc".to_string())
        );

        store.remove("accessToken").await.unwrap();
        assert_eq!(store.get("accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("backoffice-store-{}", std::process::id()));
        let store = FileStore::new(dir.join("session.json"));

        store.set("refreshToken", "r-1").await.unwrap();
        store.set("accessToken", "a-1").await.unwrap();
        assert_eq!(
            store.get("refreshToken").await.unwrap(),
            Some("r-1".to_string())
        );

        store.remove("refreshToken").await.unwrap();
        assert_eq!(store.get("refreshToken").await.unwrap(), None);
        assert_eq!(
            store.get("accessToken").await.unwrap(),
            Some("a-1".to_string())
        );

        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}

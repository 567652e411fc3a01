//! Sled-based Key-Value Store Implementation

use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{KeyValueStorePort, StoreError};

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/explorer.sled".to_string(),
        }
    }
}

/// Sled 键值存储
///
/// 收藏与视图模式偏好存放在 `prefs:` 前缀下，每次写入后 flush
pub struct SledKeyValueStore {
    db: Db,
}

impl SledKeyValueStore {
    /// 创建新的存储实例
    pub fn new(config: &SledStoreConfig) -> Result<Self, StoreError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            entries = db.len(),
            "SledKeyValueStore initialized"
        );

        Ok(Self { db })
    }

    /// 打开现有存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn storage_key(key: &str) -> String {
        format!("prefs:{}", key)
    }
}

#[async_trait]
impl KeyValueStorePort for SledKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self
            .db
            .get(Self::storage_key(key))
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(value.map(|v| v.to_vec()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let size = value.len();
        self.db
            .insert(Self::storage_key(key), value)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        self.db
            .flush_async()
            .await
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::debug!(key = %key, size = size, "Preference stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FAVORITES_KEY;
    use crate::application::services::FavoritesLedger;
    use crate::domain::voice::VoiceId;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_set_get() {
        let dir = tempdir().unwrap();
        let store = SledKeyValueStore::open(dir.path().join("test.sled")).unwrap();

        assert!(store.get("missing").await.unwrap().is_none());

        store.set("k", b"v1".to_vec()).await.unwrap();
        store.set("k", b"v2".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn test_favorites_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.sled");

        {
            let store = SledKeyValueStore::open(&path).unwrap().arc();
            let ledger = FavoritesLedger::load(store.clone()).await;
            ledger.toggle(&VoiceId::new("v1"));
            ledger.toggle(&VoiceId::new("v2"));
            ledger.flush().await;
            assert_eq!(
                store.get(FAVORITES_KEY).await.unwrap(),
                Some(br#"["v1","v2"]"#.to_vec())
            );
        }

        // 等待上一个实例的后台写入任务退出并释放数据库
        let store = loop {
            match SledKeyValueStore::open(&path) {
                Ok(store) => break store.arc(),
                Err(_) => tokio::time::sleep(std::time::Duration::from_millis(10)).await,
            }
        };
        let ledger = FavoritesLedger::load(store).await;
        let restored = ledger.current();
        assert!(restored.contains(&VoiceId::new("v1")));
        assert!(restored.contains(&VoiceId::new("v2")));
    }
}

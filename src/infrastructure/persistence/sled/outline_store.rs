//! Sled-based Outline Store Implementation
//!
//! 每个 thread_id 一条 JSON 文档，键为 `outline:{thread_id}`

use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{OutlineStorePort, StoreError};
use crate::domain::outline::OutlineData;

const KEY_PREFIX: &str = "outline:";

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/outlines.sled".to_string(),
        }
    }
}

/// Sled 大纲存储
pub struct SledOutlineStore {
    db: Db,
}

impl SledOutlineStore {
    /// 创建新的存储实例
    pub fn new(config: &SledStoreConfig) -> Result<Self, StoreError> {
        let db = sled::open(&config.db_path).map_err(|e| StoreError::DatabaseError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            entries = db.scan_prefix(KEY_PREFIX).count(),
            "SledOutlineStore initialized"
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

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush()
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn key(thread_id: &str) -> Result<String, StoreError> {
        if thread_id.is_empty() {
            return Err(StoreError::InvalidKey("empty thread_id".to_string()));
        }
        Ok(format!("{}{}", KEY_PREFIX, thread_id))
    }
}

#[async_trait]
impl OutlineStorePort for SledOutlineStore {
    async fn save(&self, thread_id: &str, outline: &OutlineData) -> Result<(), StoreError> {
        let key = Self::key(thread_id)?;
        let bytes =
            serde_json::to_vec(outline).map_err(|e| StoreError::SerializationError(e.to_string()))?;
        let size_bytes = bytes.len();

        self.db
            .insert(key, bytes)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        self.flush()?;

        tracing::debug!(
            thread_id = %thread_id,
            size_bytes = size_bytes,
            "Outline persisted"
        );
        Ok(())
    }

    async fn find(&self, thread_id: &str) -> Result<Option<OutlineData>, StoreError> {
        let key = Self::key(thread_id)?;

        match self.db.get(&key) {
            Ok(Some(data)) => {
                let outline = serde_json::from_slice(&data)
                    .map_err(|e| StoreError::SerializationError(e.to_string()))?;
                Ok(Some(outline))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StoreError::DatabaseError(e.to_string())),
        }
    }

    async fn delete(&self, thread_id: &str) -> Result<bool, StoreError> {
        let key = Self::key(thread_id)?;
        let removed = self
            .db
            .remove(&key)
            .map_err(|e| StoreError::DatabaseError(e.to_string()))?;
        self.flush()?;

        Ok(removed.is_some())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for item in self.db.scan_prefix(KEY_PREFIX) {
            let (key, _) = item.map_err(|e| StoreError::DatabaseError(e.to_string()))?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| StoreError::SerializationError(e.to_string()))?;
            keys.push(key[KEY_PREFIX.len()..].to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::skeleton::OutlineCompiler;
    use tempfile::tempdir;

    const SKELETON: &str = "\
## 三、人物系统
### 林凡
外卖员

### Chapter 1: 开端
**摘要**：起

```json
{\"chapter_map\": [{\"chapter\": 1, \"episodes\": \"1-2\"}], \"paywall_info\": {\"chapter\": 1, \"hook\": \"身份\"}}
```
";

    fn config(dir: &tempfile::TempDir) -> SledStoreConfig {
        SledStoreConfig {
            db_path: dir.path().join("test.sled").to_string_lossy().to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let dir = tempdir().unwrap();
        let store = SledOutlineStore::new(&config(&dir)).unwrap();
        let outline = OutlineCompiler::default().compile(SKELETON, "p1");

        store.save("t1", &outline).await.unwrap();
        let loaded = store.find("t1").await.unwrap().unwrap();

        assert_eq!(loaded, outline);
        assert_eq!(loaded.story_settings().character_list()[0].name, "林凡");
        assert_eq!(loaded.metadata().paywall_info.as_ref().unwrap().extra["hook"], "身份");
        assert!(store.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_and_list_keys() {
        let dir = tempdir().unwrap();
        let store = SledOutlineStore::new(&config(&dir)).unwrap();
        let outline = OutlineCompiler::default().compile("", "p1");

        store.save("b", &outline).await.unwrap();
        store.save("a", &outline).await.unwrap();
        assert_eq!(store.list_keys().await.unwrap(), vec!["a", "b"]);

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert_eq!(store.list_keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_rejects_empty_key() {
        let dir = tempdir().unwrap();
        let store = SledOutlineStore::new(&config(&dir)).unwrap();

        assert!(matches!(store.find("").await, Err(StoreError::InvalidKey(_))));
    }
}

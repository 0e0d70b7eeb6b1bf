//! Outline Store Port - 出站端口
//!
//! 编译好的大纲按 thread_id（会话 / 检查点 ID）存取的不透明键值存储，
//! 具体实现在 infrastructure 层（内存 / Sled）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::outline::OutlineData;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Outline Store Port
#[async_trait]
pub trait OutlineStorePort: Send + Sync {
    /// 保存大纲（同一 thread_id 覆盖旧值）
    async fn save(&self, thread_id: &str, outline: &OutlineData) -> Result<(), StoreError>;

    /// 按 thread_id 读取
    async fn find(&self, thread_id: &str) -> Result<Option<OutlineData>, StoreError>;

    /// 删除，返回是否存在
    async fn delete(&self, thread_id: &str) -> Result<bool, StoreError>;

    /// 所有 thread_id（升序）
    async fn list_keys(&self) -> Result<Vec<String>, StoreError>;
}

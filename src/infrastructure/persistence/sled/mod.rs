//! Sled 嵌入式存储

mod outline_store;

pub use outline_store::{SledOutlineStore, SledStoreConfig};

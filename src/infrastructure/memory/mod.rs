//! Memory Layer - In-Memory State Management
//!
//! 实现 OutlineStore 的内存版本（测试与一次性运行）

mod outline_store;

pub use outline_store::InMemoryOutlineStore;

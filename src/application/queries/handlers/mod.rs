//! Query Handlers 实现

mod outline_handlers;

pub use outline_handlers::*;

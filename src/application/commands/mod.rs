//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：规划、编译、删除

mod outline_commands;

pub mod handlers;

pub use outline_commands::*;

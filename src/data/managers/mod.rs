//! 数据管理器实现
//!
//! - `json`: JSON 管理器（原子写入、键名排序）

pub mod json;

pub use json::JsonManager;

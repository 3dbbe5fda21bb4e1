//! 统一数据管理模块
//!
//! 提供预设列表与 Claude Code 配置文件共用的 JSON 读写和错误类型。
//!
//! # 模块组织
//!
//! - `error`: 统一错误类型定义
//! - `managers`: 各格式管理器（目前只有 JSON）
//!
//! # 使用示例
//!
//! ```rust
//! use crate::data::JsonManager;
//! use std::path::Path;
//!
//! let manager = JsonManager::new();
//! let settings: serde_json::Value = manager.read(Path::new("settings.json"))?;
//! ```

pub mod error;
pub mod managers;

pub use error::{DataError, ErrorKind, Result};
pub use managers::JsonManager;

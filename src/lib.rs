// lib.rs - 暴露核心层给 CLI 和其他展示层使用

pub mod core;
pub mod data;
pub mod models;
pub mod services;
pub mod utils;

pub use models::*;
pub use services::{
    ActivationEngine, ActiveState, PresetStore, SettingsFile, SettingsSource, Snapshot,
};
pub use utils::config::AppPaths;
pub use utils::env_json::{format_env_json, parse_env_json};

pub use data::{DataError, ErrorKind};

// 重新导出常用类型
pub use anyhow::{Context, Result};

pub use core::{init_logger, update_log_level};

//! 核心基础设施层：日志

pub mod logger;

pub use logger::{default_log_dir, get_log_dir, init_logger, update_log_level};

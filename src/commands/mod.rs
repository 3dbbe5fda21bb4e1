pub mod preset_commands;
pub mod types;

// 重新导出所有命令函数
pub use preset_commands::*;
pub use types::*;

//! 预设激活模块
//!
//! - `engine`: 启动同步与 activate/add/delete/update 四个操作
//! - `snapshot`: 每次操作后对外发布的只读快照

mod engine;
mod snapshot;


pub use engine::ActivationEngine;
pub use snapshot::{ActiveState, Snapshot};

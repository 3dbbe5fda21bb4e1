// 服务层模块
//
// - settings_file: Claude Code settings.json 读写
// - preset_store: 预设列表 env_presets.json 持久化
// - activation: 启动同步与激活流程

pub mod activation;
pub mod preset_store;
pub mod settings_file;

pub use activation::{ActivationEngine, ActiveState, Snapshot};
pub use preset_store::PresetStore;
pub use settings_file::{SettingsFile, SettingsSource};

//! 环境变量预设（env_presets.json 中的单条记录）

use super::settings::EnvMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 未配置 `ANTHROPIC_BASE_URL` 时的展示文本
pub const NO_URL: &str = "No URL";

/// 启动时从 settings.json 同步出的预设名
pub const DEFAULT_PRESET_NAME: &str = "Default";

/// 一组命名的环境变量覆盖
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvPreset {
    pub id: Uuid,
    pub name: String,
    pub env: EnvMap,
    #[serde(default)]
    pub is_active: bool,
}

impl EnvPreset {
    /// 新建预设：随机 ID，未激活
    pub fn new(name: impl Into<String>, env: EnvMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            env,
            is_active: false,
        }
    }

    /// 列表中展示的 Base URL
    pub fn display_url(&self) -> &str {
        self.env
            .get("ANTHROPIC_BASE_URL")
            .map(String::as_str)
            .unwrap_or(NO_URL)
    }
}

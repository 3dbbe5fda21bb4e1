use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

/// 覆盖 Claude Code 配置目录的环境变量（与 Claude Code 自身一致）
pub const CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";

/// Claude Code 主配置文件名
pub const SETTINGS_FILE: &str = "settings.json";

/// 预设列表文件名
pub const PRESETS_FILE: &str = "env_presets.json";

/// 两个固定文件的位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_path: PathBuf,
    pub presets_path: PathBuf,
}

impl AppPaths {
    /// 以指定目录为根
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let config_dir = dir.into();
        Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            presets_path: config_dir.join(PRESETS_FILE),
            config_dir,
        }
    }

    /// 解析配置目录：显式参数 > `CLAUDE_CONFIG_DIR` > `~/.claude`
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        Ok(Self::in_dir(config_dir(override_dir)?))
    }
}

/// Claude Code 配置目录（不会自动创建）
pub fn config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("无法获取用户主目录"))?;
    Ok(home_dir.join(".claude"))
}

//! Claude Code 主配置文件（settings.json）读写
//!
//! 该文件归 Claude Code 所有，这里只替换 `env`，其余字段原样写回。

use crate::data::{JsonManager, Result};
use crate::models::ClaudeSettings;
use std::path::{Path, PathBuf};

/// 外部配置文档的读写接口
///
/// `ActivationEngine` 通过它访问 settings.json，测试可替换为内存实现。
pub trait SettingsSource {
    /// 文档所在路径（仅用于日志和错误信息）
    fn path(&self) -> &Path;

    /// 读取完整文档
    ///
    /// # Errors
    ///
    /// 文件缺失或无法读取返回 `NotReadable`，内容不合法返回 `ParseFailure`，
    /// 不会以空文档代替。
    fn read(&self) -> Result<ClaudeSettings>;

    /// 覆盖写入完整文档（键名排序、原子替换）
    fn write(&self, settings: &ClaudeSettings) -> Result<()>;
}

/// 基于磁盘文件的 settings.json
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    json: JsonManager,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            json: JsonManager::new(),
        }
    }
}

impl SettingsSource for SettingsFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ClaudeSettings> {
        let settings: ClaudeSettings = self.json.read(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            env_keys = settings.env.as_ref().map_or(0, |env| env.len()),
            "已读取 Claude Code 配置"
        );
        Ok(settings)
    }

    fn write(&self, settings: &ClaudeSettings) -> Result<()> {
        self.json.write(&self.path, settings)?;
        tracing::info!(path = %self.path.display(), "已写入 Claude Code 配置");
        Ok(())
    }
}

//! 预设列表（env_presets.json）的持久化
//!
//! 文件是本程序独占的有序数组。加载宽松：缺失或损坏都视为空列表，
//! 随后由启动同步从 settings.json 重建 "Default"。
//! 所有修改先作用于副本，写盘成功后才替换内存中的列表，
//! 因此内存状态始终与磁盘一致。

use crate::data::{DataError, JsonManager, Result};
use crate::models::{EnvMap, EnvPreset, DEFAULT_PRESET_NAME};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct PresetStore {
    path: PathBuf,
    json: JsonManager,
    presets: Vec<EnvPreset>,
}

impl PresetStore {
    /// 打开并加载预设列表
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let json = JsonManager::new();
        let presets = load(&json, &path);
        Self {
            path,
            json,
            presets,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn presets(&self) -> &[EnvPreset] {
        &self.presets
    }

    pub fn get(&self, id: Uuid) -> Option<&EnvPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn active(&self) -> Option<&EnvPreset> {
        self.presets.iter().find(|p| p.is_active)
    }

    /// 将当前列表写盘
    pub fn save(&self) -> Result<()> {
        self.json.write(&self.path, &self.presets)
    }

    /// 追加预设（新预设一律不激活）
    pub fn add(&mut self, mut preset: EnvPreset) -> Result<()> {
        if self.get(preset.id).is_some() {
            return Err(DataError::InvalidInput(format!("预设 ID 已存在: {}", preset.id)));
        }
        preset.is_active = false;

        let mut next = self.presets.clone();
        next.push(preset);
        self.commit(next)
    }

    /// 按 ID 删除，返回是否确有删除
    pub fn remove(&mut self, id: Uuid) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let next = self.presets.iter().filter(|p| p.id != id).cloned().collect();
        self.commit(next)?;
        Ok(true)
    }

    /// 按 ID 替换名称与 env，激活标记保持存储中的值
    pub fn update(&mut self, preset: EnvPreset) -> Result<()> {
        let mut next = self.presets.clone();
        let slot = next
            .iter_mut()
            .find(|p| p.id == preset.id)
            .ok_or_else(|| DataError::NotFound(preset.id.to_string()))?;
        slot.name = preset.name;
        slot.env = preset.env;
        self.commit(next)
    }

    /// 激活目标预设，其余全部置为未激活
    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        if self.get(id).is_none() {
            return Err(DataError::NotFound(id.to_string()));
        }
        let next = self
            .presets
            .iter()
            .cloned()
            .map(|mut p| {
                p.is_active = p.id == id;
                p
            })
            .collect();
        self.commit(next)
    }

    /// 用外部 env 创建或刷新 "Default" 预设并将其激活
    ///
    /// 已有同名预设时只更新其 env；否则插入到列表最前面。
    pub fn adopt_default(&mut self, env: EnvMap) -> Result<Uuid> {
        let mut next: Vec<EnvPreset> = self
            .presets
            .iter()
            .cloned()
            .map(|mut p| {
                p.is_active = false;
                p
            })
            .collect();

        let id = match next.iter_mut().find(|p| p.name == DEFAULT_PRESET_NAME) {
            Some(existing) => {
                existing.env = env;
                existing.is_active = true;
                existing.id
            }
            None => {
                let mut preset = EnvPreset::new(DEFAULT_PRESET_NAME, env);
                preset.is_active = true;
                let id = preset.id;
                next.insert(0, preset);
                id
            }
        };

        self.commit(next)?;
        Ok(id)
    }

    fn commit(&mut self, next: Vec<EnvPreset>) -> Result<()> {
        self.json.write(&self.path, &next)?;
        self.presets = next;
        Ok(())
    }
}

/// 宽松加载：文件缺失或无法解析时返回空列表
pub fn load(json: &JsonManager, path: &Path) -> Vec<EnvPreset> {
    let mut presets: Vec<EnvPreset> = match json.read(path) {
        Ok(presets) => presets,
        Err(DataError::NotReadable { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::debug!(path = %path.display(), "预设文件不存在，从空列表开始");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "加载预设失败，从空列表开始");
            return Vec::new();
        }
    };

    // 手工编辑可能留下多个激活项，只保留第一个
    let mut seen_active = false;
    for preset in presets.iter_mut().filter(|p| p.is_active) {
        if seen_active {
            tracing::warn!(preset = %preset.name, "预设文件中存在多个激活项，已取消该项的激活");
            preset.is_active = false;
        }
        seen_active = true;
    }

    tracing::debug!(count = presets.len(), "已加载预设列表");
    presets
}

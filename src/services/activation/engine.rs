//! ActivationEngine 核心实现
//!
//! 协调两份独立的 JSON 文档：本地预设列表与 Claude Code 的 settings.json。
//! 关键顺序：先写 settings.json，成功后才移动激活标记并保存预设列表，
//! 因此激活标记永远不会指向一份尚未写入的 env。

use super::snapshot::{ActiveState, Snapshot};
use crate::data::{DataError, ErrorKind, Result};
use crate::models::{EnvMap, EnvPreset};
use crate::services::preset_store::PresetStore;
use crate::services::settings_file::{SettingsFile, SettingsSource};
use crate::utils::config::AppPaths;
use uuid::Uuid;

type Listener = Box<dyn FnMut(&Snapshot)>;

pub struct ActivationEngine<S: SettingsSource = SettingsFile> {
    settings: S,
    store: PresetStore,
    last_error: Option<String>,
    listeners: Vec<Listener>,
}

impl ActivationEngine<SettingsFile> {
    /// 按路径打开两份文件（预设列表宽松加载，不执行启动同步）
    pub fn open(paths: &AppPaths) -> Self {
        Self::with_parts(
            SettingsFile::new(&paths.settings_path),
            PresetStore::open(&paths.presets_path),
        )
    }
}

impl<S: SettingsSource> ActivationEngine<S> {
    pub fn with_parts(settings: S, store: PresetStore) -> Self {
        Self {
            settings,
            store,
            last_error: None,
            listeners: Vec::new(),
        }
    }

    // ==================== 只读状态 ====================

    pub fn presets(&self) -> &[EnvPreset] {
        self.store.presets()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            presets: self.store.presets().to_vec(),
            last_error: self.last_error.clone(),
        }
    }

    pub fn active_preset(&self) -> Option<&EnvPreset> {
        self.store.active()
    }

    pub fn active_state(&self) -> ActiveState {
        self.store
            .active()
            .map_or(ActiveState::NoActive, |p| ActiveState::ActiveIs(p.id))
    }

    /// 按 ID 或名称查找预设（ID 优先）
    pub fn find(&self, key: &str) -> Option<&EnvPreset> {
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(preset) = self.store.get(id) {
                return Some(preset);
            }
        }
        self.store.presets().iter().find(|p| p.name == key)
    }

    /// 注册快照监听器，每次操作结束（无论成败）都会收到最新快照
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Snapshot) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    // ==================== 操作 ====================

    /// 启动同步：没有激活预设时，把 settings.json 的 env 收录为 "Default"
    pub fn bootstrap(&mut self) -> Result<()> {
        let result = self.try_bootstrap();
        self.finish("bootstrap", result)
    }

    fn try_bootstrap(&mut self) -> Result<()> {
        if let Some(active) = self.store.active() {
            tracing::debug!(preset = %active.name, "已有激活预设，跳过启动同步");
            return Ok(());
        }

        let settings = self.settings.read()?;
        let Some(env) = settings.env else {
            tracing::debug!(path = %self.settings.path().display(), "settings.json 没有 env，跳过启动同步");
            return Ok(());
        };

        let id = self.store.adopt_default(env)?;
        tracing::info!(preset_id = %id, "已从 settings.json 同步 Default 预设");
        Ok(())
    }

    /// 激活预设：写入 settings.json 的 env，成功后再移动激活标记
    pub fn activate(&mut self, id: Uuid) -> Result<()> {
        let result = self.try_activate(id);
        self.finish("activate", result)
    }

    fn try_activate(&mut self, id: Uuid) -> Result<()> {
        let target = self
            .store
            .get(id)
            .ok_or_else(|| DataError::NotFound(id.to_string()))?;
        let env = target.env.clone();
        let name = target.name.clone();

        let mut settings = self.settings.read()?;
        settings.replace_env(env);
        self.settings.write(&settings)?;

        self.store.set_active(id).map_err(|e| {
            tracing::error!(preset = %name, error = %e, "settings.json 已更新，但预设列表保存失败");
            e
        })?;

        tracing::info!(preset = %name, preset_id = %id, "已激活预设");
        Ok(())
    }

    /// 新增预设（不会自动激活，也不触碰 settings.json）
    pub fn add(&mut self, preset: EnvPreset) -> Result<()> {
        let result = validate_name(&preset.name).and_then(|_| {
            let (id, name) = (preset.id, preset.name.clone());
            self.store.add(preset)?;
            tracing::info!(preset = %name, preset_id = %id, "已新增预设");
            Ok(())
        });
        self.finish("add", result)
    }

    /// 删除预设
    ///
    /// 删除当前激活的预设后不会有其他预设被激活，settings.json 保持不变。
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let was_active = self.store.active().is_some_and(|p| p.id == id);
        let result = self.store.remove(id).map(|removed| {
            if removed {
                tracing::info!(preset_id = %id, was_active, "已删除预设");
            } else {
                tracing::debug!(preset_id = %id, "预设不存在，无需删除");
            }
        });
        self.finish("delete", result)
    }

    /// 修改预设名称或 env
    ///
    /// 只更新本地列表。即使修改的是激活预设，也需要重新激活才会写入 settings.json。
    pub fn update(&mut self, preset: EnvPreset) -> Result<()> {
        let result = validate_name(&preset.name).and_then(|_| {
            let (id, name) = (preset.id, preset.name.clone());
            self.store.update(preset)?;
            if self.store.active().is_some_and(|p| p.id == id) {
                tracing::info!(preset = %name, "已修改激活预设，重新激活后生效");
            } else {
                tracing::info!(preset = %name, preset_id = %id, "已修改预设");
            }
            Ok(())
        });
        self.finish("update", result)
    }

    /// 读取 settings.json 当前的 env（用于预填新增表单）
    pub fn current_env(&mut self) -> Result<Option<EnvMap>> {
        let result = self.settings.read().map(|settings| settings.env);
        self.finish("current_env", result)
    }

    /// 记录结果并通知监听器：失败覆盖 last_error，成功则清空
    fn finish<T>(&mut self, operation: &str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => {
                // 文件缺失（如首次使用时没有 settings.json）不算异常
                if e.kind() == ErrorKind::NotReadable {
                    tracing::info!(operation, error = %e, "操作失败");
                } else {
                    tracing::warn!(operation, error = %e, "操作失败");
                }
                self.last_error = Some(e.to_string());
            }
        }

        if !self.listeners.is_empty() {
            let snapshot = self.snapshot();
            for listener in &mut self.listeners {
                listener(&snapshot);
            }
        }

        result
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DataError::InvalidInput("预设名称不能为空".to_string()));
    }
    Ok(())
}

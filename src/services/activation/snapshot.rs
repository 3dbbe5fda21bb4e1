//! 对外发布的只读状态

use crate::models::EnvPreset;
use serde::Serialize;
use uuid::Uuid;

/// 当前激活状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum ActiveState {
    NoActive,
    ActiveIs(Uuid),
}

/// 每次操作后发布给展示层的快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub presets: Vec<EnvPreset>,
    pub last_error: Option<String>,
}

impl Snapshot {
    pub fn active_state(&self) -> ActiveState {
        self.presets
            .iter()
            .find(|p| p.is_active)
            .map_or(ActiveState::NoActive, |p| ActiveState::ActiveIs(p.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnvMap;
    use serde_json::json;

    #[test]
    fn active_state_follows_flag() {
        let mut preset = EnvPreset::new("p", EnvMap::new());
        let mut snapshot = Snapshot {
            presets: vec![preset.clone()],
            last_error: None,
        };
        assert_eq!(snapshot.active_state(), ActiveState::NoActive);

        preset.is_active = true;
        snapshot.presets = vec![preset.clone()];
        assert_eq!(snapshot.active_state(), ActiveState::ActiveIs(preset.id));
    }

    #[test]
    fn serializes_for_frontend() {
        let snapshot = Snapshot {
            presets: vec![],
            last_error: Some("boom".into()),
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value, json!({"presets": [], "lastError": "boom"}));
        assert_eq!(
            serde_json::to_value(ActiveState::NoActive).unwrap(),
            json!({"state": "no_active"})
        );
    }
}

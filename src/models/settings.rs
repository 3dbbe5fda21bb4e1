//! Claude Code 主配置（settings.json）数据结构
//!
//! 只有 `env` 会被本程序改写。其余已知字段按类型建模，未知字段一律落入
//! 各层的 `extra`，写回时原样输出。已建模字段用 [`Nullable`] 区分
//! "缺失" 与显式 `null`，两者都会原样写回。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 环境变量块
pub type EnvMap = BTreeMap<String, String>;

/// `None` 表示字段缺失，`Some(None)` 表示显式 `null`
pub type Nullable<T> = Option<Option<T>>;

/// 出现即为 `Some`（包括 `null`），缺失时由 `#[serde(default)]` 给出 `None`
fn present<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// settings.json 顶层结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvMap>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub include_co_authored_by: Nullable<bool>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub permissions: Nullable<Permissions>,
    /// 事件名 -> hook 分组
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hooks: Nullable<BTreeMap<String, Vec<HookGroup>>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub enabled_plugins: Nullable<BTreeMap<String, bool>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub always_thinking_enabled: Nullable<bool>,
    /// 未建模字段（model、statusLine、apiKeyHelper 等）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub allow: Nullable<Vec<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub deny: Nullable<Vec<String>>,
    /// defaultMode、ask、additionalDirectories 等
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookGroup {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub hooks: Nullable<Vec<Hook>>,
    /// matcher 等
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    #[serde(
        default,
        rename = "type",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Nullable<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub command: Nullable<String>,
    /// timeout 等
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaudeSettings {
    /// 用给定环境变量整体替换 `env`，其他字段不动
    pub fn replace_env(&mut self, env: EnvMap) {
        self.env = Some(env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "env": {"ANTHROPIC_BASE_URL": "https://a", "ANTHROPIC_AUTH_TOKEN": "sk-1"},
            "includeCoAuthoredBy": false,
            "model": "opus",
            "statusLine": {"type": "command", "command": "~/.claude/status.sh"},
            "permissions": {
                "allow": ["Bash(git status)"],
                "deny": [],
                "defaultMode": "acceptEdits"
            },
            "hooks": {
                "PostToolUse": [{
                    "matcher": "Edit|Write",
                    "hooks": [{"type": "command", "command": "fmt.sh", "timeout": 30}]
                }]
            },
            "enabledPlugins": {"review@market": true},
            "alwaysThinkingEnabled": true
        })
    }

    #[test]
    fn decodes_known_fields() {
        let settings: ClaudeSettings = serde_json::from_value(sample()).unwrap();

        let env = settings.env.as_ref().unwrap();
        assert_eq!(env.get("ANTHROPIC_BASE_URL").unwrap(), "https://a");
        assert_eq!(settings.include_co_authored_by, Some(Some(false)));
        assert_eq!(settings.always_thinking_enabled, Some(Some(true)));

        let permissions = settings.permissions.clone().flatten().unwrap();
        assert_eq!(permissions.allow, Some(Some(vec!["Bash(git status)".to_string()])));
        assert_eq!(permissions.extra["defaultMode"], json!("acceptEdits"));

        let hooks = settings.hooks.clone().flatten().unwrap();
        let group = &hooks["PostToolUse"][0];
        let hook = &group.hooks.clone().flatten().unwrap()[0];
        assert_eq!(hook.kind, Some(Some("command".to_string())));
        assert_eq!(group.extra["matcher"], json!("Edit|Write"));
        assert_eq!(hook.extra["timeout"], json!(30));
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let original = sample();
        let settings: ClaudeSettings = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(settings.extra["model"], json!("opus"));

        let encoded = serde_json::to_value(&settings).unwrap();
        assert_eq!(encoded, original);
    }

    #[test]
    fn replace_env_touches_only_env() {
        let mut settings: ClaudeSettings = serde_json::from_value(sample()).unwrap();
        let before = settings.clone();

        let mut env = EnvMap::new();
        env.insert("ANTHROPIC_BASE_URL".into(), "https://b".into());
        settings.replace_env(env.clone());

        assert_eq!(settings.env, Some(env));
        assert_eq!(settings.permissions, before.permissions);
        assert_eq!(settings.hooks, before.hooks);
        assert_eq!(settings.extra, before.extra);
    }

    #[test]
    fn absent_env_is_not_emitted() {
        let settings: ClaudeSettings = serde_json::from_value(json!({"model": "sonnet"})).unwrap();
        assert!(settings.env.is_none());
        assert_eq!(serde_json::to_value(&settings).unwrap(), json!({"model": "sonnet"}));
    }

    #[test]
    fn explicit_nulls_in_known_fields_survive_roundtrip() {
        let original = json!({
            "env": {"A": "1"},
            "includeCoAuthoredBy": null,
            "alwaysThinkingEnabled": null,
            "enabledPlugins": null,
            "permissions": {"allow": ["Read"], "deny": null},
            "hooks": {"Stop": [{"hooks": [{"type": null, "command": "done.sh"}]}]},
            "model": null
        });
        let settings: ClaudeSettings = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(settings.include_co_authored_by, Some(None));
        assert_eq!(settings.permissions.clone().flatten().unwrap().deny, Some(None));

        assert_eq!(serde_json::to_value(&settings).unwrap(), original);
    }

    #[test]
    fn null_permissions_block_is_kept() {
        let original = json!({"permissions": null, "hooks": null});
        let settings: ClaudeSettings = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(settings.permissions, Some(None));
        assert_eq!(serde_json::to_value(&settings).unwrap(), original);
    }

    #[test]
    fn non_string_env_value_is_rejected() {
        let result = serde_json::from_value::<ClaudeSettings>(json!({"env": {"PORT": 8080}}));
        assert!(result.is_err());
    }
}

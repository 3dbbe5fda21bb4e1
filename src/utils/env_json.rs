//! 环境变量块与 JSON 文本互转
//!
//! 用户以 JSON 对象编辑预设的 env，这里负责校验与格式化。

use crate::data::{DataError, Result};
use crate::models::EnvMap;

/// 解析用户输入的 env JSON
///
/// 只接受 `{"KEY": "value", ...}` 形式，值必须是字符串。空白输入视为空对象。
pub fn parse_env_json(input: &str) -> Result<EnvMap> {
    if input.trim().is_empty() {
        return Ok(EnvMap::new());
    }
    serde_json::from_str::<EnvMap>(input)
        .map_err(|e| DataError::InvalidInput(format!("JSON 解析错误: {e}")))
}

/// 按键名排序的格式化 JSON，用于预填编辑框
pub fn format_env_json(env: &EnvMap) -> String {
    // BTreeMap<String, String> 序列化不会失败
    serde_json::to_string_pretty(env).unwrap_or_else(|_| "{}".to_string())
}

//! JSON 文件管理器
//!
//! 提供 JSON 文件的类型化读写，支持：
//! - 读取时区分"无法读取"与"解析失败"两类错误
//! - 写入时键名排序、两空格缩进，便于人工 diff
//! - 原子写入：同目录临时文件 + rename，不暴露半写文件
//! - 沿用目标文件原有权限；目标为符号链接时写入链接指向的真实文件
//! - 自动创建父目录
//!
//! # 使用示例
//!
//! ```rust
//! use std::path::Path;
//! use crate::data::managers::JsonManager;
//!
//! let manager = JsonManager::new();
//! let settings: ClaudeSettings = manager.read(Path::new("~/.claude/settings.json"))?;
//! manager.write(Path::new("~/.claude/settings.json"), &settings)?;
//! ```

use crate::data::{DataError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// JSON 文件管理器（无缓存，每次读写都直达磁盘）
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManager;

impl JsonManager {
    pub fn new() -> Self {
        Self
    }

    /// 读取并反序列化整个 JSON 文件
    ///
    /// # 返回
    ///
    /// - `Ok(T)`: 解析结果
    /// - `Err(DataError::NotReadable)`: 文件不存在或无法读取
    /// - `Err(DataError::ParseFailure)`: 内容不是合法 JSON 或结构不符
    pub fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path).map_err(|e| DataError::not_readable(path, e))?;
        serde_json::from_str(&content).map_err(|e| DataError::parse(path, e))
    }

    /// 序列化并原子写入整个 JSON 文件
    ///
    /// 先经由 `serde_json::Value` 归一化（对象键按字典序排列），
    /// 再写入同目录临时文件，最后 rename 覆盖目标。
    pub fn write<T: Serialize + ?Sized>(&self, path: &Path, data: &T) -> Result<()> {
        let content = to_sorted_pretty(data).map_err(|e| DataError::write(path, e))?;
        let target = resolve_target(path);
        let dir = parent_dir(&target);

        fs::create_dir_all(&dir).map_err(|e| DataError::write(&dir, e))?;

        let mut temp = tempfile::Builder::new()
            .prefix(".tmp-")
            .suffix(".json")
            .tempfile_in(&dir)
            .map_err(|e| DataError::write(&target, format!("创建临时文件失败: {e}")))?;

        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| DataError::write(&target, format!("写入临时文件失败: {e}")))?;

        // tempfile 默认 0o600，已有文件时沿用其原权限
        if let Ok(metadata) = fs::metadata(&target) {
            fs::set_permissions(temp.path(), metadata.permissions())
                .map_err(|e| DataError::write(&target, format!("复制文件权限失败: {e}")))?;
        }

        temp.persist(&target)
            .map_err(|e| DataError::write(&target, format!("替换目标文件失败: {}", e.error)))?;

        tracing::debug!(path = %target.display(), bytes = content.len(), "JSON 文件已写入");
        Ok(())
    }
}

/// 序列化为键名排序、带结尾换行的格式化 JSON
pub fn to_sorted_pretty<T: Serialize + ?Sized>(data: &T) -> serde_json::Result<String> {
    let value = serde_json::to_value(data)?;
    let mut content = serde_json::to_string_pretty(&value)?;
    content.push('\n');
    Ok(content)
}

/// 目标是符号链接时返回真实路径，否则原样返回
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ErrorKind;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    #[test]
    fn test_read_write_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.json");

        let manager = JsonManager::new();
        let content = json!({"key": "value", "nested": {"a": 1}});
        manager.write(&file_path, &content).unwrap();

        let read_content: Value = manager.read(&file_path).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_write_sorts_keys_and_indents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.json");

        let mut map = serde_json::Map::new();
        map.insert("zeta".into(), json!(1));
        map.insert("alpha".into(), json!({"y": 2, "b": 3}));
        JsonManager::new()
            .write(&file_path, &Value::Object(map))
            .unwrap();

        let raw = fs::read_to_string(&file_path).unwrap();
        assert_eq!(
            raw,
            "{\n  \"alpha\": {\n    \"b\": 3,\n    \"y\": 2\n  },\n  \"zeta\": 1\n}\n"
        );
    }

    #[test]
    fn test_read_missing_file_is_not_readable() {
        let temp_dir = TempDir::new().unwrap();
        let err = JsonManager::new()
            .read::<Value>(&temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotReadable);
    }

    #[test]
    fn test_read_invalid_json_is_parse_failure() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.json");
        fs::write(&file_path, "{not json").unwrap();

        let err = JsonManager::new().read::<Value>(&file_path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn test_auto_create_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("subdir").join("config.json");

        JsonManager::new()
            .write(&file_path, &json!({"key": "value"}))
            .unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("config.json");
        let manager = JsonManager::new();

        manager.write(&file_path, &json!({"a": 1})).unwrap();
        manager.write(&file_path, &json!({"a": 2})).unwrap();

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("config.json")]);
    }

    #[test]
    fn test_write_into_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let dir_path = temp_dir.path().join("occupied");
        fs::create_dir(&dir_path).unwrap();
        fs::write(dir_path.join("child"), "x").unwrap();

        let err = JsonManager::new()
            .write(&dir_path, &json!({"a": 1}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteFailure);
    }

    #[test]
    #[cfg(unix)]
    fn test_write_preserves_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.json");
        fs::write(&file_path, "{}").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o644)).unwrap();

        JsonManager::new()
            .write(&file_path, &json!({"key": "value"}))
            .unwrap();

        let perms = fs::metadata(&file_path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o644);
    }

    #[test]
    #[cfg(unix)]
    fn test_write_follows_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&real, "{}").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        JsonManager::new().write(&link, &json!({"a": 1})).unwrap();

        assert!(fs::symlink_metadata(&link)
            .unwrap()
            .file_type()
            .is_symlink());
        let value: Value = JsonManager::new().read(&real).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }
}

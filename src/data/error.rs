//! 统一错误类型定义
//!
//! 使用 `thiserror` 定义预设与配置文件读写的所有错误类型，`anyhow` 可直接包装。

use std::path::PathBuf;
use thiserror::Error;

/// 错误类别（不携带细节，便于调用方按类别分支）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotReadable,
    ParseFailure,
    WriteFailure,
    NotFound,
    InvalidInput,
}

/// 数据管理模块的统一错误类型
#[derive(Error, Debug)]
pub enum DataError {
    /// 文件不存在或无法读取
    #[error("无法读取文件: {path}: {source}")]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 内容存在但不符合预期结构
    #[error("解析失败: {path}: {source}")]
    ParseFailure {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 序列化或写入失败
    #[error("写入失败: {path}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    /// 预设不存在
    #[error("未找到预设: {0}")]
    NotFound(String),

    /// 输入不合法
    #[error("输入无效: {0}")]
    InvalidInput(String),
}

/// 便于与现有代码集成的类型别名
pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    pub fn not_readable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::NotReadable {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ParseFailure {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::WriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotReadable { .. } => ErrorKind::NotReadable,
            Self::ParseFailure { .. } => ErrorKind::ParseFailure,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "未找到预设: abc");
    }

    #[test]
    fn test_not_readable_construction() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DataError::not_readable("/path/to/settings.json", io_err);
        assert!(err.to_string().contains("/path/to/settings.json"));
        assert_eq!(err.kind(), ErrorKind::NotReadable);
    }

    #[test]
    fn test_parse_error_kind() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err();
        let err = DataError::parse("settings.json", json_err);
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert!(err.to_string().starts_with("解析失败"));
    }

    #[test]
    fn test_write_error_keeps_reason() {
        let err = DataError::write("/tmp/x.json", "磁盘已满");
        assert_eq!(err.kind(), ErrorKind::WriteFailure);
        assert!(err.to_string().contains("磁盘已满"));
    }

    #[test]
    fn test_anyhow_conversion() {
        let err = DataError::InvalidInput("名称不能为空".to_string());
        let anyhow_err: anyhow::Error = err.into();
        assert!(anyhow_err.to_string().contains("名称不能为空"));
    }
}

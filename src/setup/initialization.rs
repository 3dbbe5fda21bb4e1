use anyhow::{Context, Result};
use claude_env_switch::core::init_logger;
use claude_env_switch::{
    ActivationEngine, AppPaths, DataError, ErrorKind, LogConfig, LogLevel, LogOutput,
};
use std::path::Path;

/// 初始化日志系统
///
/// 级别无效时回退到 warn；初始化失败只提示，不影响命令执行
fn init_logging(level: &str, log_file: bool) {
    let level = level.parse::<LogLevel>().unwrap_or_else(|e| {
        eprintln!("WARNING: {}，使用 warn", e);
        LogLevel::Warn
    });

    let log_config = LogConfig {
        level,
        output: if log_file {
            LogOutput::Both
        } else {
            LogOutput::Console
        },
        ..LogConfig::default()
    };

    if let Err(e) = init_logger(&log_config) {
        // tracing 还不可用
        eprintln!("WARNING: Failed to initialize logging system: {}", e);
    }
}

/// 启动初始化：日志、路径解析、预设加载与启动同步
///
/// 启动同步失败不会中断命令（错误也会记录在 last_error 中）
pub fn initialize_app(
    config_dir: Option<&Path>,
    log_level: &str,
    log_file: bool,
) -> Result<ActivationEngine> {
    init_logging(log_level, log_file);

    let paths = AppPaths::resolve(config_dir).context("无法确定 Claude Code 配置目录")?;
    tracing::debug!(
        settings = %paths.settings_path.display(),
        presets = %paths.presets_path.display(),
        "已解析配置路径"
    );

    let mut engine = ActivationEngine::open(&paths);
    if let Err(e) = engine.bootstrap() {
        report_bootstrap_failure(&e);
    }

    Ok(engine)
}

/// settings.json 不存在是首次使用的常态，只记日志；内容损坏等才打印到 stderr
fn report_bootstrap_failure(error: &DataError) -> bool {
    if error.kind() == ErrorKind::NotReadable {
        tracing::info!(error = %error, "未读取到 settings.json，跳过启动同步");
        return false;
    }
    eprintln!("WARNING: 启动同步失败: {}", error);
    true
}

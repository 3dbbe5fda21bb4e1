use crate::models::config::{LogConfig, LogFormat, LogLevel, LogOutput};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    reload::{self, Handle},
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "claude-env-switch";

/// 全局日志级别 reload handle
static LOG_LEVEL_HANDLE: OnceLock<Handle<EnvFilter, Registry>> = OnceLock::new();

/// 初始化日志系统
///
/// 支持基于配置的日志输出，包括：
/// - 日志级别（trace/debug/info/warn/error）
/// - 输出格式（JSON/纯文本）
/// - 输出目标（控制台/文件/both）
/// - 文件路径（用于文件输出）
///
/// 控制台输出写到 stderr，stdout 留给命令行结果。
///
/// # 热重载支持
/// 日志级别可以通过 `update_log_level` 动态调整，其余配置需要重新启动进程。
pub fn init_logger(config: &LogConfig) -> anyhow::Result<()> {
    // 1. 创建可重载的过滤层
    let filter = create_env_filter(&config.level);
    let (filter_layer, reload_handle) = reload::Layer::new(filter);

    // 2. 保存 reload handle
    if LOG_LEVEL_HANDLE.set(reload_handle).is_err() {
        anyhow::bail!("日志系统已初始化，不能重复初始化");
    }

    // 3. 根据配置添加输出层并初始化
    let use_console = matches!(config.output, LogOutput::Console | LogOutput::Both);
    let log_dir = match config.output {
        LogOutput::File | LogOutput::Both => Some(get_log_dir(config.file_path.as_deref())?),
        LogOutput::Console => None,
    };

    Registry::default()
        .with(filter_layer)
        .with(use_console.then(|| create_console_layer(config.format)))
        .with(log_dir.map(|dir| create_file_layer(config.format, dir)))
        .try_init()
        .map_err(|e| anyhow::anyhow!("注册日志订阅者失败: {}", e))?;

    tracing::debug!(
        level = config.level.as_str(),
        format = ?config.format,
        output = ?config.output,
        file_path = ?config.file_path,
        "日志系统初始化完成"
    );

    Ok(())
}

/// 创建环境过滤器
fn create_env_filter(level: &LogLevel) -> EnvFilter {
    // 优先从环境变量读取，格式：RUST_LOG=claude_env_switch=trace
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("claude_env_switch={}", level.as_str())))
}

/// 创建控制台输出层
fn create_console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    match format {
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(cfg!(debug_assertions))
            .with_thread_ids(false)
            .with_ansi(true)
            .with_span_events(if cfg!(debug_assertions) {
                FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            })
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(cfg!(debug_assertions))
            .with_thread_ids(false)
            .boxed(),
    }
}

/// 创建文件输出层（按天滚动）
fn create_file_layer<S>(format: LogFormat, log_dir: PathBuf) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    let file_appender = rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = non_blocking(file_appender);

    // guard 必须活到进程结束，否则缓冲日志会丢失
    Box::leak(Box::new(guard));

    match format {
        LogFormat::Text => fmt::layer()
            .with_writer(non_blocking)
            .with_target(cfg!(debug_assertions))
            .with_thread_ids(false)
            .with_ansi(false)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .boxed(),
    }
}

/// 获取日志目录（不存在则创建）
pub fn get_log_dir(file_path: Option<&str>) -> anyhow::Result<PathBuf> {
    let dir = match file_path {
        Some(path) => PathBuf::from(path),
        None => default_log_dir(),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// 默认日志目录：数据目录下的 claude-env-switch/logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_PREFIX)
        .join("logs")
}

/// 动态更新日志级别（热重载）
pub fn update_log_level(new_level: LogLevel) -> anyhow::Result<()> {
    let handle = LOG_LEVEL_HANDLE
        .get()
        .ok_or_else(|| anyhow::anyhow!("日志系统未初始化"))?;

    handle
        .reload(create_env_filter(&new_level))
        .map_err(|e| anyhow::anyhow!("重载日志级别失败: {}", e))?;

    tracing::info!(new_level = new_level.as_str(), "日志级别已动态更新");
    Ok(())
}

// 命令行参数定义

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "claude-env-switch", version, about = "切换 Claude Code settings.json 的环境变量预设")]
pub struct Cli {
    /// Claude Code 配置目录（默认 $CLAUDE_CONFIG_DIR 或 ~/.claude）
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// 日志级别（error/warn/info/debug/trace）
    #[arg(long, global = true, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// 同时把日志写入按天滚动的日志文件
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 列出全部预设，`*` 标记当前激活项
    List,
    /// 查看单个预设
    Show {
        /// 预设 ID 或名称
        preset: String,
    },
    /// 打印 settings.json 当前的 env
    Current,
    /// 激活预设并写入 settings.json
    Activate {
        /// 预设 ID 或名称
        preset: String,
    },
    /// 新增预设
    Add {
        name: String,
        /// env JSON，例如 '{"ANTHROPIC_BASE_URL":"https://..."}'
        #[arg(long, conflicts_with = "from_current")]
        env: Option<String>,
        /// 以 settings.json 当前的 env 作为初始值
        #[arg(long)]
        from_current: bool,
    },
    /// 修改预设名称或 env（激活中的预设需重新 activate 才会生效）
    Update {
        /// 预设 ID 或名称
        preset: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        env: Option<String>,
    },
    /// 删除预设
    Delete {
        /// 预设 ID 或名称
        preset: String,
    },
}

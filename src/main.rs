use clap::Parser;

// 导入 commands 模块
mod commands;
use commands::*;

mod setup;

fn run(cli: Cli) -> anyhow::Result<String> {
    let mut engine =
        setup::initialize_app(cli.config_dir.as_deref(), &cli.log_level, cli.log_file)?;

    match cli.command {
        Command::List => Ok(list_presets(&engine)),
        Command::Show { preset } => show_preset(&engine, &preset),
        Command::Current => current_env(&mut engine),
        Command::Activate { preset } => activate_preset(&mut engine, &preset),
        Command::Add {
            name,
            env,
            from_current,
        } => add_preset(&mut engine, &name, env.as_deref(), from_current),
        Command::Update { preset, name, env } => {
            update_preset(&mut engine, &preset, name.as_deref(), env.as_deref())
        }
        Command::Delete { preset } => delete_preset(&mut engine, &preset),
    }
}

fn main() {
    match run(Cli::parse()) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("错误: {:#}", e);
            std::process::exit(1);
        }
    }
}

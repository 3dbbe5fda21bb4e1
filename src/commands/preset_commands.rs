//! 预设管理命令
//!
//! 每个命令只做参数转换并调用 ActivationEngine，返回要打印到 stdout 的文本。

use anyhow::{anyhow, Context, Result};
use claude_env_switch::{
    format_env_json, parse_env_json, ActivationEngine, EnvPreset, SettingsSource,
};

fn resolve<S: SettingsSource>(engine: &ActivationEngine<S>, key: &str) -> Result<EnvPreset> {
    engine
        .find(key)
        .cloned()
        .ok_or_else(|| anyhow!("未找到预设: {}", key))
}

/// 列出全部预设
pub fn list_presets<S: SettingsSource>(engine: &ActivationEngine<S>) -> String {
    if engine.presets().is_empty() {
        return "暂无预设，可使用 add 新增\n".to_string();
    }

    let width = engine
        .presets()
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);

    engine
        .presets()
        .iter()
        .map(|preset| {
            let marker = if preset.is_active { '*' } else { ' ' };
            format!(
                "{marker} {:<width$}  {}  {}\n",
                preset.name,
                preset.display_url(),
                preset.id,
            )
        })
        .collect()
}

/// 查看单个预设
pub fn show_preset<S: SettingsSource>(engine: &ActivationEngine<S>, key: &str) -> Result<String> {
    let preset = resolve(engine, key)?;
    Ok(format!(
        "名称: {}\nID:   {}\n激活: {}\n{}\n",
        preset.name,
        preset.id,
        if preset.is_active { "是" } else { "否" },
        format_env_json(&preset.env),
    ))
}

/// 打印 settings.json 当前 env
pub fn current_env<S: SettingsSource>(engine: &mut ActivationEngine<S>) -> Result<String> {
    let env = engine
        .current_env()
        .context("读取 settings.json 失败")?
        .unwrap_or_default();
    Ok(format!("{}\n", format_env_json(&env)))
}

/// 激活预设
pub fn activate_preset<S: SettingsSource>(
    engine: &mut ActivationEngine<S>,
    key: &str,
) -> Result<String> {
    let preset = resolve(engine, key)?;
    engine.activate(preset.id)?;
    Ok(format!("已激活: {} ({})\n", preset.name, preset.display_url()))
}

/// 新增预设
pub fn add_preset<S: SettingsSource>(
    engine: &mut ActivationEngine<S>,
    name: &str,
    env_json: Option<&str>,
    from_current: bool,
) -> Result<String> {
    let env = if from_current {
        engine
            .current_env()
            .context("读取 settings.json 失败")?
            .unwrap_or_default()
    } else {
        env_json.map(parse_env_json).transpose()?.unwrap_or_default()
    };

    let preset = EnvPreset::new(name.trim(), env);
    let id = preset.id;
    engine.add(preset)?;
    Ok(format!("已新增: {} ({})\n", name.trim(), id))
}

/// 修改预设
pub fn update_preset<S: SettingsSource>(
    engine: &mut ActivationEngine<S>,
    key: &str,
    name: Option<&str>,
    env_json: Option<&str>,
) -> Result<String> {
    let mut preset = resolve(engine, key)?;
    if let Some(name) = name {
        preset.name = name.trim().to_string();
    }
    if let Some(text) = env_json {
        preset.env = parse_env_json(text)?;
    }

    let was_active = preset.is_active;
    let label = preset.name.clone();
    engine.update(preset)?;

    let mut out = format!("已修改: {label}\n");
    if was_active {
        out.push_str("该预设处于激活状态，重新执行 activate 后才会写入 settings.json\n");
    }
    Ok(out)
}

/// 删除预设
pub fn delete_preset<S: SettingsSource>(
    engine: &mut ActivationEngine<S>,
    key: &str,
) -> Result<String> {
    let preset = resolve(engine, key)?;
    engine.delete(preset.id)?;

    let mut out = format!("已删除: {}\n", preset.name);
    if preset.is_active {
        out.push_str("已删除激活中的预设，settings.json 保持不变，当前没有激活的预设\n");
    }
    Ok(out)
}

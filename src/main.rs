// ==========================================
// 模拟器设置层 - 命令行入口
// ==========================================
// 用法:
//   emu-settings [--profile ID] list
//   emu-settings [--profile ID] get KEY [--global]
//   emu-settings [--profile ID] set KEY VALUE
//   emu-settings [--profile ID] reset KEY
//   emu-settings [--profile ID] revert KEY
//   emu-settings [--profile ID] snapshot
//   emu-settings decode PARAMS
// ==========================================

use anyhow::{bail, Context, Result};
use emu_settings::app::{get_default_db_path, AppState};
use emu_settings::input::{binding_text, display_string};
use emu_settings::settings::{AnySetting, SettingRegistry, SettingType};
use emu_settings::{Layer, ParamPackage, ProfileId, ReadScope};

const USAGE: &str = "用法: emu-settings [--profile ID] <list|get KEY [--global]|set KEY VALUE|reset KEY|revert KEY|snapshot|decode PARAMS>";

/// 解析后的命令行参数
struct Cli {
    profile: Option<ProfileId>,
    force_global: bool,
    command: Vec<String>,
}

impl Cli {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut profile = None;
        let mut force_global = false;
        let mut command = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--profile" => {
                    let id = args.next().context("--profile 需要一个 profile ID")?;
                    profile = Some(ProfileId::new(id));
                }
                "--global" => force_global = true,
                _ => command.push(arg),
            }
        }

        if command.is_empty() {
            bail!("{}", USAGE);
        }

        Ok(Self {
            profile,
            force_global,
            command,
        })
    }

    fn read_scope(&self) -> ReadScope {
        if self.force_global {
            ReadScope::ForceGlobal
        } else {
            ReadScope::AsConfigured
        }
    }

    fn arg(&self, index: usize, name: &str) -> Result<&str> {
        self.command
            .get(index)
            .map(String::as_str)
            .with_context(|| format!("缺少参数 {}\n{}", name, USAGE))
    }
}

fn main() -> Result<()> {
    emu_settings::logging::init();

    let cli = Cli::parse(std::env::args().skip(1))?;

    // decode 不需要打开存储
    if cli.command[0] == "decode" {
        return decode(cli.arg(1, "PARAMS")?);
    }

    let db_path = get_default_db_path();
    tracing::debug!("使用数据库: {}", db_path);
    let state = AppState::new(db_path).context("无法初始化设置存储")?;

    if let Some(profile) = &cli.profile {
        let overrides = state.load_profile(profile.clone())?;
        tracing::info!(profile = %profile, overrides, "已加载按游戏配置");
    }

    let store = state.store.as_ref();
    let mut registry = state.registry()?;

    match cli.command[0].as_str() {
        "list" => {
            for setting in registry.iter() {
                println!(
                    "{}\t{}\t{:?}\t{}",
                    setting.key(),
                    setting.setting_type(),
                    setting.scope(),
                    setting.display_string(store, cli.read_scope())?
                );
            }
        }
        "get" => {
            let key = cli.arg(1, "KEY")?;
            let setting = lookup(&mut registry, &state, key)?;
            println!("{}", setting.display_string(store, cli.read_scope())?);
        }
        "set" => {
            let key = cli.arg(1, "KEY")?;
            let value = cli.arg(2, "VALUE")?;
            let setting = lookup(&mut registry, &state, key)?;
            setting.set_from_str(store, value)?;
            println!("{} = {} ({:?})", key, setting.display_string(store, ReadScope::AsConfigured)?, setting.scope());
        }
        "reset" => {
            let key = cli.arg(1, "KEY")?;
            let setting = lookup(&mut registry, &state, key)?;
            setting.reset(store)?;
            println!("{} = {}", key, setting.default_string(store)?);
        }
        "revert" => {
            let key = cli.arg(1, "KEY")?;
            let setting = lookup(&mut registry, &state, key)?;
            let removed = setting.revert_to_global(store)?;
            println!(
                "{}: {}",
                key,
                if removed { "已撤销按游戏覆写" } else { "没有按游戏覆写" }
            );
        }
        "snapshot" => {
            let layer = match &cli.profile {
                Some(id) => Layer::Profile(id.clone()),
                None => Layer::Global,
            };
            println!("{}", state.store.snapshot(&layer)?);
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }

    Ok(())
}

/// 查找设置；输入绑定 key 不在静态目录中，首次访问时按 String 设置注册
fn lookup<'a>(
    registry: &'a mut SettingRegistry,
    state: &AppState,
    key: &str,
) -> Result<&'a mut AnySetting> {
    if registry.get(key).is_none() && state.store.defaults().contains(key) {
        let mut setting = AnySetting::new(key.to_string(), SettingType::String);
        setting.sync_scope(state.store.as_ref())?;
        registry.register(setting)?;
    }
    Ok(registry.require_mut(key)?)
}

fn decode(raw: &str) -> Result<()> {
    let params = ParamPackage::parse(raw);
    for (key, value) in params.iter() {
        println!("{}\t{}", key, value);
    }
    let text = binding_text(&params);
    if !text.is_empty() {
        println!("=> {}", display_string(&params, &text));
    }
    Ok(())
}

// ==========================================
// 模拟器设置层 - 设置目录
// ==========================================
// 职责: 已知设置的 key、类型、默认值文本
// 说明: 默认值文本须能被对应类型解析（否则首次访问报告 MalformedDefault）
// ==========================================

use crate::input::model::{NativeAnalog, NativeButton};
use crate::settings::value::SettingType;

/// 目录条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub setting_type: SettingType,
    pub default: &'static str,
}

const fn entry(key: &'static str, setting_type: SettingType, default: &'static str) -> CatalogEntry {
    CatalogEntry {
        key,
        setting_type,
        default,
    }
}

// ==========================================
// 设置 key 常量
// ==========================================
pub mod keys {
    // 系统
    pub const USE_DOCKED_MODE: &str = "use_docked_mode";
    pub const USE_CUSTOM_RTC: &str = "custom_rtc_enabled";
    pub const CUSTOM_RTC: &str = "custom_rtc";
    pub const LANGUAGE_INDEX: &str = "language_index";
    pub const REGION_INDEX: &str = "region_index";
    pub const DEVICE_NAME: &str = "device_name";

    // CPU / 速度
    pub const USE_SPEED_LIMIT: &str = "use_speed_limit";
    pub const SPEED_LIMIT: &str = "speed_limit";
    pub const CPU_ACCURACY: &str = "cpu_accuracy";

    // 图形
    pub const RENDERER_BACKEND: &str = "backend";
    pub const RESOLUTION_SETUP: &str = "resolution_setup";
    pub const RENDERER_DEBUG: &str = "debug";
    pub const DRIVER_PATH: &str = "driver_path";

    // 音频
    pub const AUDIO_MUTED: &str = "audio_muted";
    pub const AUDIO_VOLUME: &str = "volume";

    // 输入
    pub const STICK_DEADZONE: &str = "stick_deadzone";
    pub const MOTION_SENSITIVITY: &str = "motion_sensitivity";
}

/// 非输入绑定类的设置目录
pub const ENTRIES: &[CatalogEntry] = &[
    entry(keys::USE_DOCKED_MODE, SettingType::Bool, "true"),
    entry(keys::USE_CUSTOM_RTC, SettingType::Bool, "false"),
    entry(keys::CUSTOM_RTC, SettingType::Long, "0"),
    entry(keys::LANGUAGE_INDEX, SettingType::Int, "1"),
    entry(keys::REGION_INDEX, SettingType::Int, "1"),
    entry(keys::DEVICE_NAME, SettingType::String, ""),
    entry(keys::USE_SPEED_LIMIT, SettingType::Bool, "true"),
    entry(keys::SPEED_LIMIT, SettingType::Int, "100"),
    entry(keys::CPU_ACCURACY, SettingType::Int, "0"),
    entry(keys::RENDERER_BACKEND, SettingType::Int, "1"),
    entry(keys::RESOLUTION_SETUP, SettingType::Int, "2"),
    entry(keys::RENDERER_DEBUG, SettingType::Bool, "false"),
    entry(keys::DRIVER_PATH, SettingType::String, ""),
    entry(keys::AUDIO_MUTED, SettingType::Bool, "false"),
    entry(keys::AUDIO_VOLUME, SettingType::Int, "100"),
    entry(keys::STICK_DEADZONE, SettingType::Float, "0.15"),
    entry(keys::MOTION_SENSITIVITY, SettingType::Float, "1"),
];

/// 玩家数（8 名玩家 + 掌机模式）
pub const PLAYER_COUNT: usize = 10;

/// 按键绑定的设置 key
pub fn button_binding_key(player_index: usize, button: NativeButton) -> String {
    format!("player_{}_button_{}", player_index, button.param_name())
}

/// 摇杆绑定的设置 key
pub fn stick_binding_key(player_index: usize, analog: NativeAnalog) -> String {
    format!("player_{}_stick_{}", player_index, analog.param_name())
}

/// 所有输入绑定 key（默认值均为空参数包 ""）
pub fn input_binding_keys() -> Vec<String> {
    let mut keys = Vec::with_capacity(PLAYER_COUNT * (NativeButton::ALL.len() + NativeAnalog::ALL.len()));
    for player in 0..PLAYER_COUNT {
        keys.extend(NativeButton::ALL.iter().map(|b| button_binding_key(player, *b)));
        keys.extend(NativeAnalog::ALL.iter().map(|a| stick_binding_key(player, *a)));
    }
    keys
}

/// 完整目录的 (key, 默认值文本)，供存储侧默认值表初始化
pub fn default_entries() -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = ENTRIES
        .iter()
        .map(|e| (e.key.to_string(), e.default.to_string()))
        .collect();
    entries.extend(input_binding_keys().into_iter().map(|k| (k, String::new())));
    entries
}

pub fn find(key: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|e| e.key == key)
}

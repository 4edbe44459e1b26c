// ==========================================
// 模拟器设置层 - AnySetting
// ==========================================
// 职责: 五种类型设置的标签联合，供设置目录统一持有与遍历
// ==========================================

use crate::settings::error::{SettingError, SettingResult};
use crate::settings::setting::{ReadScope, Scope, Setting};
use crate::settings::value::{SettingType, SettingValue};
use crate::store::backing_store::BackingStore;
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub enum AnySetting {
    Bool(Setting<bool>),
    Int(Setting<i32>),
    Float(Setting<f32>),
    Long(Setting<i64>),
    String(Setting<String>),
}

// 对每个变体执行同一表达式
macro_rules! each_variant {
    ($value:expr, $setting:ident => $body:expr) => {
        match $value {
            AnySetting::Bool($setting) => $body,
            AnySetting::Int($setting) => $body,
            AnySetting::Float($setting) => $body,
            AnySetting::Long($setting) => $body,
            AnySetting::String($setting) => $body,
        }
    };
}

impl AnySetting {
    /// 按类型标签构建
    pub fn new(key: impl Into<Cow<'static, str>>, setting_type: SettingType) -> Self {
        match setting_type {
            SettingType::Bool => AnySetting::Bool(Setting::new(key)),
            SettingType::Int => AnySetting::Int(Setting::new(key)),
            SettingType::Float => AnySetting::Float(Setting::new(key)),
            SettingType::Long => AnySetting::Long(Setting::new(key)),
            SettingType::String => AnySetting::String(Setting::new(key)),
        }
    }

    pub fn key(&self) -> &str {
        each_variant!(self, s => s.key())
    }

    pub fn scope(&self) -> Scope {
        each_variant!(self, s => s.scope())
    }

    pub fn setting_type(&self) -> SettingType {
        match self {
            AnySetting::Bool(_) => SettingType::Bool,
            AnySetting::Int(_) => SettingType::Int,
            AnySetting::Float(_) => SettingType::Float,
            AnySetting::Long(_) => SettingType::Long,
            AnySetting::String(_) => SettingType::String,
        }
    }

    pub fn display_string(&self, store: &dyn BackingStore, scope: ReadScope) -> SettingResult<String> {
        each_variant!(self, s => s.display_string(store, scope))
    }

    /// 默认值的展示文本
    pub fn default_string(&self, store: &dyn BackingStore) -> SettingResult<String> {
        each_variant!(self, s => s.default_value(store).map(|v| v.encode()))
    }

    pub fn reset(&self, store: &dyn BackingStore) -> SettingResult<()> {
        each_variant!(self, s => s.reset(store))
    }

    pub fn revert_to_global(&mut self, store: &dyn BackingStore) -> SettingResult<bool> {
        each_variant!(self, s => s.revert_to_global(store))
    }

    pub fn sync_scope(&mut self, store: &dyn BackingStore) -> SettingResult<Scope> {
        each_variant!(self, s => s.sync_scope(store))
    }

    /// 从文本写入（文本须能解析为该设置的类型）
    pub fn set_from_str(&mut self, store: &dyn BackingStore, raw: &str) -> SettingResult<()> {
        each_variant!(self, s => {
            let value = decode_for(s, raw)?;
            s.set(store, value)
        })
    }

    pub fn as_bool(&self) -> Option<&Setting<bool>> {
        match self {
            AnySetting::Bool(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&Setting<i32>> {
        match self {
            AnySetting::Int(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&Setting<f32>> {
        match self {
            AnySetting::Float(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<&Setting<i64>> {
        match self {
            AnySetting::Long(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&Setting<String>> {
        match self {
            AnySetting::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_mut(&mut self) -> Option<&mut Setting<String>> {
        match self {
            AnySetting::String(s) => Some(s),
            _ => None,
        }
    }
}

fn decode_for<T: SettingValue>(setting: &Setting<T>, raw: &str) -> SettingResult<T> {
    T::decode(raw).ok_or_else(|| SettingError::InvalidValue {
        key: setting.key().to_string(),
        expected: T::TYPE,
        raw: raw.to_string(),
    })
}

impl From<Setting<bool>> for AnySetting {
    fn from(s: Setting<bool>) -> Self {
        AnySetting::Bool(s)
    }
}

impl From<Setting<i32>> for AnySetting {
    fn from(s: Setting<i32>) -> Self {
        AnySetting::Int(s)
    }
}

impl From<Setting<f32>> for AnySetting {
    fn from(s: Setting<f32>) -> Self {
        AnySetting::Float(s)
    }
}

impl From<Setting<i64>> for AnySetting {
    fn from(s: Setting<i64>) -> Self {
        AnySetting::Long(s)
    }
}

impl From<Setting<String>> for AnySetting {
    fn from(s: Setting<String>) -> Self {
        AnySetting::String(s)
    }
}

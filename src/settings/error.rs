// ==========================================
// 模拟器设置层 - 设置错误类型
// ==========================================
// 分类:
// - 软缺失（key 缺失、值无法解析、无 profile 上下文）: 不进入此类型，按默认值处理
// - 默认值格式错误: 设置目录与类型不匹配，属于目录缺陷
// - 存储不可用: 无法安全回退，向调用方传播
// 所有错误信息都带上出错的 key
// ==========================================

use crate::settings::value::SettingType;
use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingError {
    #[error("后备存储访问失败 (key={key}): {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("默认值格式错误: key={key}, expected={expected}, raw={raw:?}")]
    MalformedDefault {
        key: String,
        expected: SettingType,
        raw: String,
    },

    #[error("无效的设置值: key={key}, expected={expected}, raw={raw:?}")]
    InvalidValue {
        key: String,
        expected: SettingType,
        raw: String,
    },

    #[error("设置 key 重复: {0}")]
    DuplicateKey(String),

    #[error("未知设置: {0}")]
    UnknownSetting(String),

    #[error("输入选择类型不匹配 (key={key}): 需要 {expected}")]
    SelectionMismatch { key: String, expected: &'static str },

    #[error("设置注册表锁获取失败: {0}")]
    RegistryLock(String),
}

impl SettingError {
    /// 将存储错误归属到具体 key
    pub fn store(key: &str, source: StoreError) -> Self {
        SettingError::Store {
            key: key.to_string(),
            source,
        }
    }

    /// 出错的 key（注册表锁错误没有 key，返回空串）
    pub fn key(&self) -> &str {
        match self {
            SettingError::Store { key, .. }
            | SettingError::MalformedDefault { key, .. }
            | SettingError::InvalidValue { key, .. }
            | SettingError::SelectionMismatch { key, .. } => key,
            SettingError::DuplicateKey(key) | SettingError::UnknownSetting(key) => key,
            SettingError::RegistryLock(_) => "",
        }
    }
}

/// Result 类型别名
pub type SettingResult<T> = Result<T, SettingError>;

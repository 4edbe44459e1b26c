// ==========================================
// 模拟器设置层 - 后备存储契约
// ==========================================
// 职责: 定义设置层读写存储所需的最小接口（不包含实现）
// 约束: 所有调用均同步；profile 上下文以显式 Layer 参数传入每次调用
// ==========================================

use crate::settings::value::SettingValue;
use crate::store::error::StoreResult;
use std::fmt;

// ==========================================
// ProfileId / ProfileContext / Layer
// ==========================================

/// 按游戏配置的标识（通常为游戏 title id）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 存储当前的 profile 上下文快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileContext {
    /// 未加载任何按游戏配置
    #[default]
    Inactive,
    /// 已加载指定 profile 的按游戏配置
    Active(ProfileId),
}

impl ProfileContext {
    pub fn is_active(&self) -> bool {
        matches!(self, ProfileContext::Active(_))
    }

    pub fn profile(&self) -> Option<&ProfileId> {
        match self {
            ProfileContext::Active(id) => Some(id),
            ProfileContext::Inactive => None,
        }
    }
}

/// 一次读写所针对的存储层
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    Global,
    Profile(ProfileId),
}

impl Layer {
    pub fn is_global(&self) -> bool {
        matches!(self, Layer::Global)
    }

    /// config_scope 表中的 scope_id
    pub fn scope_id(&self) -> String {
        match self {
            Layer::Global => "global".to_string(),
            Layer::Profile(id) => format!("profile/{}", id),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scope_id())
    }
}

// ==========================================
// BackingStore Trait
// ==========================================
// 实现者: SqliteStore（config_kv 表）、MemoryStore
pub trait BackingStore: Send + Sync {
    /// 读取当前 profile 上下文（原子快照）
    ///
    /// 设置层每次操作只取一次快照，之后的读写都使用由它推导出的 Layer，
    /// 因此上下文切换不会在一次解析中途被观察到。
    fn profile_context(&self) -> StoreResult<ProfileContext>;

    /// 读取指定层的原始值
    ///
    /// # 返回
    /// - Ok(Some(String)): 该层存在值
    /// - Ok(None): 该层没有这个 key（不向其他层回退）
    fn read_raw(&self, key: &str, layer: &Layer) -> StoreResult<Option<String>>;

    /// 写入指定层（覆盖）
    fn write_raw(&self, key: &str, layer: &Layer, value: &str) -> StoreResult<()>;

    /// 删除指定层的值，返回是否确实删除了记录
    fn remove_raw(&self, key: &str, layer: &Layer) -> StoreResult<bool>;

    /// 目录中声明的默认值（文本形式）
    fn default_as_string(&self, key: &str) -> StoreResult<String>;

    fn is_profile_context_active(&self) -> StoreResult<bool> {
        Ok(self.profile_context()?.is_active())
    }
}

// ==========================================
// TypedStoreExt - 类型化读写
// ==========================================

/// 在原始文本接口之上提供类型化读写
///
/// 无法解析的存储值视为软缺失（返回 None 并记 warn）。
pub trait TypedStoreExt: BackingStore {
    fn read_typed<T: SettingValue>(&self, key: &str, layer: &Layer) -> StoreResult<Option<T>> {
        let Some(raw) = self.read_raw(key, layer)? else {
            return Ok(None);
        };
        match T::decode(&raw) {
            Some(value) => Ok(Some(value)),
            None => {
                tracing::warn!(
                    key = %key,
                    layer = %layer,
                    raw_value = %raw,
                    expected = %T::TYPE,
                    "存储值无法解析，按缺失处理"
                );
                Ok(None)
            }
        }
    }

    fn write_typed<T: SettingValue>(&self, key: &str, layer: &Layer, value: &T) -> StoreResult<()> {
        self.write_raw(key, layer, &value.encode())
    }

    // ===== 按类型的便捷读写 =====

    fn get_bool(&self, key: &str, layer: &Layer) -> StoreResult<Option<bool>> {
        self.read_typed(key, layer)
    }

    fn get_int(&self, key: &str, layer: &Layer) -> StoreResult<Option<i32>> {
        self.read_typed(key, layer)
    }

    fn get_float(&self, key: &str, layer: &Layer) -> StoreResult<Option<f32>> {
        self.read_typed(key, layer)
    }

    fn get_long(&self, key: &str, layer: &Layer) -> StoreResult<Option<i64>> {
        self.read_typed(key, layer)
    }

    fn get_string(&self, key: &str, layer: &Layer) -> StoreResult<Option<String>> {
        self.read_typed(key, layer)
    }

    fn set_bool(&self, key: &str, layer: &Layer, value: bool) -> StoreResult<()> {
        self.write_typed(key, layer, &value)
    }

    fn set_int(&self, key: &str, layer: &Layer, value: i32) -> StoreResult<()> {
        self.write_typed(key, layer, &value)
    }

    fn set_float(&self, key: &str, layer: &Layer, value: f32) -> StoreResult<()> {
        self.write_typed(key, layer, &value)
    }

    fn set_long(&self, key: &str, layer: &Layer, value: i64) -> StoreResult<()> {
        self.write_typed(key, layer, &value)
    }

    fn set_string(&self, key: &str, layer: &Layer, value: &str) -> StoreResult<()> {
        self.write_raw(key, layer, value)
    }
}

impl<S: BackingStore + ?Sized> TypedStoreExt for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_scope_id() {
        assert_eq!(Layer::Global.scope_id(), "global");
        assert_eq!(
            Layer::Profile(ProfileId::new("0100000000010000")).scope_id(),
            "profile/0100000000010000"
        );
    }

    #[test]
    fn test_profile_context_accessors() {
        let ctx = ProfileContext::Active(ProfileId::new("p1"));
        assert!(ctx.is_active());
        assert_eq!(ctx.profile().map(ProfileId::as_str), Some("p1"));
        assert!(!ProfileContext::Inactive.is_active());
        assert_eq!(ProfileContext::default(), ProfileContext::Inactive);
    }
}

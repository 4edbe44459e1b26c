// ==========================================
// 模拟器设置层 - Setting<T>
// ==========================================
// 职责: 单个类型化设置在 全局层 / 按游戏覆写层 之间的解析
// 状态机:
// - 初始 Global
// - 在 profile 上下文激活时写入 -> PerProfile
// - PerProfile -> Global 只通过 revert_to_global()（reset 不改变 scope）
// ==========================================

use crate::settings::error::{SettingError, SettingResult};
use crate::settings::value::SettingValue;
use crate::store::backing_store::{BackingStore, Layer, ProfileContext};
use crate::store::TypedStoreExt;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::OnceLock;

/// 设置当前指向的存储层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    PerProfile,
}

/// 读取时调用方要求的层
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadScope {
    /// 按设置当前 scope 决定
    #[default]
    AsConfigured,
    /// 无论 scope 如何都读全局层
    ForceGlobal,
}

/// 类型化设置
///
/// 默认值在首次访问时向存储查询并缓存，此后不再查询（存储运行期修改默认值不会生效）。
/// 每次操作只取一次 profile 上下文快照。
#[derive(Debug, Clone)]
pub struct Setting<T: SettingValue> {
    key: Cow<'static, str>,
    scope: Scope,
    // Err 保存无法解析的原始默认值文本
    default: OnceLock<Result<T, String>>,
}

impl<T: SettingValue> Setting<T> {
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            scope: Scope::Global,
            default: OnceLock::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_global(&self) -> bool {
        self.scope == Scope::Global
    }

    // ===== 默认值 =====

    /// 获取（缓存的）默认值
    ///
    /// # 返回
    /// - Ok(T): 默认值
    /// - Err(MalformedDefault): 目录声明的默认值无法解析为 T（结果同样被缓存）
    /// - Err(Store): 存储不可用（不缓存，下次访问重试）
    pub fn default_value(&self, store: &dyn BackingStore) -> SettingResult<T> {
        if let Some(cached) = self.default.get() {
            return self.cached_default(cached);
        }

        let raw = store
            .default_as_string(&self.key)
            .map_err(|e| SettingError::store(&self.key, e))?;
        let parsed = T::decode(&raw).ok_or(raw);
        if let Err(raw) = &parsed {
            tracing::error!(
                key = %self.key,
                expected = %T::TYPE,
                raw_default = %raw,
                "默认值无法解析，设置目录与类型不匹配"
            );
        }

        let cached = self.default.get_or_init(|| parsed);
        self.cached_default(cached)
    }

    fn cached_default(&self, cached: &Result<T, String>) -> SettingResult<T> {
        cached.clone().map_err(|raw| SettingError::MalformedDefault {
            key: self.key.to_string(),
            expected: T::TYPE,
            raw,
        })
    }

    // ===== 读写 =====

    /// 读取当前值
    ///
    /// key 缺失或存储值无法解析时回退到默认值；PerProfile 层缺值时先回退到全局层。
    pub fn get(&self, store: &dyn BackingStore, scope: ReadScope) -> SettingResult<T> {
        let layer = match scope {
            ReadScope::ForceGlobal => Layer::Global,
            ReadScope::AsConfigured => {
                let ctx = self.context(store)?;
                self.layer_for(&ctx)
            }
        };
        self.read_layer(store, &layer)
    }

    /// 写入
    ///
    /// profile 上下文激活时写入按游戏层，并把 scope 提升为 PerProfile；
    /// 否则写入全局层。非有限浮点数等无法读回的值返回 InvalidValue，不写入。
    pub fn set(&mut self, store: &dyn BackingStore, value: T) -> SettingResult<()> {
        if !value.is_storable() {
            return Err(SettingError::InvalidValue {
                key: self.key.to_string(),
                expected: T::TYPE,
                raw: value.encode(),
            });
        }

        let ctx = self.context(store)?;
        let layer = match &ctx {
            ProfileContext::Active(id) => Layer::Profile(id.clone()),
            ProfileContext::Inactive => Layer::Global,
        };

        store
            .write_typed(&self.key, &layer, &value)
            .map_err(|e| SettingError::store(&self.key, e))?;

        if ctx.is_active() && self.scope == Scope::Global {
            tracing::info!(key = %self.key, layer = %layer, "设置转为按游戏覆写");
            self.scope = Scope::PerProfile;
        }
        Ok(())
    }

    /// 将缓存的默认值写入当前生效层（不改变 scope）
    pub fn reset(&self, store: &dyn BackingStore) -> SettingResult<()> {
        let default = self.default_value(store)?;
        let ctx = self.context(store)?;
        let layer = self.layer_for(&ctx);
        store
            .write_typed(&self.key, &layer, &default)
            .map_err(|e| SettingError::store(&self.key, e))?;
        tracing::debug!(key = %self.key, layer = %layer, "设置已重置为默认值");
        Ok(())
    }

    /// 撤销当前 profile 的覆写并回到全局 scope
    ///
    /// # 返回
    /// - Ok(true): 删除了一条覆写
    /// - Ok(false): 当前没有可删除的覆写（scope 仍会回到 Global）
    pub fn revert_to_global(&mut self, store: &dyn BackingStore) -> SettingResult<bool> {
        let ctx = self.context(store)?;
        let removed = match ctx.profile() {
            Some(id) => store
                .remove_raw(&self.key, &Layer::Profile(id.clone()))
                .map_err(|e| SettingError::store(&self.key, e))?,
            None => false,
        };
        if self.scope != Scope::Global {
            tracing::info!(key = %self.key, removed, "设置回到全局");
        }
        self.scope = Scope::Global;
        Ok(removed)
    }

    /// 依据存储中是否存在当前 profile 的覆写同步 scope
    ///
    /// 用于重新加载按游戏配置后恢复 scope（scope 本身不持久化，覆写记录持久化）。
    pub fn sync_scope(&mut self, store: &dyn BackingStore) -> SettingResult<Scope> {
        let ctx = self.context(store)?;
        self.scope = match ctx.profile() {
            Some(id) => {
                let has_override = store
                    .read_raw(&self.key, &Layer::Profile(id.clone()))
                    .map_err(|e| SettingError::store(&self.key, e))?
                    .is_some();
                if has_override {
                    Scope::PerProfile
                } else {
                    Scope::Global
                }
            }
            None => Scope::Global,
        };
        Ok(self.scope)
    }

    /// 展示用文本（与存储使用同一格式化规则）
    pub fn display_string(&self, store: &dyn BackingStore, scope: ReadScope) -> SettingResult<String> {
        Ok(self.get(store, scope)?.encode())
    }

    // ===== 内部 =====

    fn context(&self, store: &dyn BackingStore) -> SettingResult<ProfileContext> {
        store
            .profile_context()
            .map_err(|e| SettingError::store(&self.key, e))
    }

    fn layer_for(&self, ctx: &ProfileContext) -> Layer {
        match (self.scope, ctx) {
            (Scope::PerProfile, ProfileContext::Active(id)) => Layer::Profile(id.clone()),
            _ => Layer::Global,
        }
    }

    fn read_layer(&self, store: &dyn BackingStore, layer: &Layer) -> SettingResult<T> {
        let value = store
            .read_typed::<T>(&self.key, layer)
            .map_err(|e| SettingError::store(&self.key, e))?;
        if let Some(value) = value {
            return Ok(value);
        }

        if !layer.is_global() {
            let global = store
                .read_typed::<T>(&self.key, &Layer::Global)
                .map_err(|e| SettingError::store(&self.key, e))?;
            if let Some(value) = global {
                tracing::debug!(key = %self.key, layer = %layer, "按游戏层无值，回退到全局层");
                return Ok(value);
            }
        }

        self.default_value(store)
    }
}

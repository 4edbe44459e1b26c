// ==========================================
// 模拟器设置层 - 进程内存储
// ==========================================
// 职责: BackingStore 的内存实现（嵌入式场景 / 测试）
// 说明: 语义与 SqliteStore 一致；可模拟"存储不可达"
// ==========================================

use crate::store::backing_store::{BackingStore, Layer, ProfileContext, ProfileId};
use crate::store::defaults::DefaultTable;
use crate::store::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

pub struct MemoryStore {
    layers: RwLock<HashMap<Layer, HashMap<String, String>>>,
    context: RwLock<ProfileContext>,
    defaults: DefaultTable,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new(defaults: DefaultTable) -> Self {
        Self {
            layers: RwLock::new(HashMap::new()),
            context: RwLock::new(ProfileContext::Inactive),
            defaults,
            available: AtomicBool::new(true),
        }
    }

    /// 使用完整设置目录的默认值
    pub fn with_catalog() -> Self {
        Self::new(DefaultTable::from_catalog())
    }

    pub fn defaults(&self) -> &DefaultTable {
        &self.defaults
    }

    /// 加载按游戏配置上下文
    pub fn load_profile(&self, profile: ProfileId) -> StoreResult<()> {
        self.check_available()?;
        let mut ctx = self
            .context
            .write()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        tracing::info!(profile = %profile, "加载按游戏配置上下文");
        *ctx = ProfileContext::Active(profile);
        Ok(())
    }

    /// 卸载按游戏配置上下文
    pub fn unload_profile(&self) -> StoreResult<()> {
        self.check_available()?;
        let mut ctx = self
            .context
            .write()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        tracing::info!("卸载按游戏配置上下文");
        *ctx = ProfileContext::Inactive;
        Ok(())
    }

    /// 模拟存储可达/不可达
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("内存存储已标记为不可达".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_catalog()
    }
}

impl BackingStore for MemoryStore {
    fn profile_context(&self) -> StoreResult<ProfileContext> {
        self.check_available()?;
        let ctx = self
            .context
            .read()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(ctx.clone())
    }

    fn read_raw(&self, key: &str, layer: &Layer) -> StoreResult<Option<String>> {
        self.check_available()?;
        let layers = self
            .layers
            .read()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(layers.get(layer).and_then(|values| values.get(key)).cloned())
    }

    fn write_raw(&self, key: &str, layer: &Layer, value: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut layers = self
            .layers
            .write()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        layers
            .entry(layer.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_raw(&self, key: &str, layer: &Layer) -> StoreResult<bool> {
        self.check_available()?;
        let mut layers = self
            .layers
            .write()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(layers
            .get_mut(layer)
            .map(|values| values.remove(key).is_some())
            .unwrap_or(false))
    }

    fn default_as_string(&self, key: &str) -> StoreResult<String> {
        self.check_available()?;
        self.defaults.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_are_independent() {
        let store = MemoryStore::with_catalog();
        let profile = Layer::Profile(ProfileId::new("p1"));
        store.write_raw("device_name", &Layer::Global, "A").expect("write");
        store.write_raw("device_name", &profile, "B").expect("write");

        assert_eq!(
            store.read_raw("device_name", &Layer::Global).expect("read").as_deref(),
            Some("A")
        );
        assert_eq!(store.read_raw("device_name", &profile).expect("read").as_deref(), Some("B"));
        assert!(store.remove_raw("device_name", &profile).expect("remove"));
        assert!(!store.remove_raw("device_name", &profile).expect("remove"));
        assert_eq!(store.read_raw("device_name", &profile).expect("read"), None);
    }

    #[test]
    fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::with_catalog();
        store.set_available(false);
        assert!(matches!(store.profile_context(), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.read_raw("device_name", &Layer::Global),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.default_as_string("device_name"), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_profile_context_switch() {
        let store = MemoryStore::with_catalog();
        assert!(!store.is_profile_context_active().expect("ctx"));
        store.load_profile(ProfileId::new("p1")).expect("load");
        assert_eq!(
            store.profile_context().expect("ctx"),
            ProfileContext::Active(ProfileId::new("p1"))
        );
        store.unload_profile().expect("unload");
        assert!(!store.is_profile_context_active().expect("ctx"));
    }
}

// ==========================================
// 模拟器设置层 - 设置注册表
// ==========================================
// 职责: 进程内全部已知设置的目录（按注册顺序）
// 说明: 注册表自身不加锁；多线程访问由调用方串行化
// ==========================================

use crate::settings::any_setting::AnySetting;
use crate::settings::catalog;
use crate::settings::error::{SettingError, SettingResult};
use crate::store::backing_store::BackingStore;
use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct SettingRegistry {
    settings: IndexMap<String, AnySetting>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由静态目录构建（不含按玩家生成的输入绑定 key）
    pub fn from_catalog() -> Self {
        let mut registry = Self::new();
        for e in catalog::ENTRIES {
            registry
                .settings
                .insert(e.key.to_string(), AnySetting::new(e.key, e.setting_type));
        }
        registry
    }

    /// 注册设置；key 重复时报错
    pub fn register(&mut self, setting: impl Into<AnySetting>) -> SettingResult<()> {
        let setting = setting.into();
        let key = setting.key().to_string();
        if self.settings.contains_key(&key) {
            return Err(SettingError::DuplicateKey(key));
        }
        self.settings.insert(key, setting);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&AnySetting> {
        self.settings.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AnySetting> {
        self.settings.get_mut(key)
    }

    /// 同 get，但 key 未注册时返回 UnknownSetting
    pub fn require(&self, key: &str) -> SettingResult<&AnySetting> {
        self.get(key)
            .ok_or_else(|| SettingError::UnknownSetting(key.to_string()))
    }

    pub fn require_mut(&mut self, key: &str) -> SettingResult<&mut AnySetting> {
        self.settings
            .get_mut(key)
            .ok_or_else(|| SettingError::UnknownSetting(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnySetting> {
        self.settings.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// 加载/切换 profile 后，按存储中的覆写记录同步所有设置的 scope
    pub fn sync_scopes(&mut self, store: &dyn BackingStore) -> SettingResult<usize> {
        let mut per_profile = 0;
        for setting in self.settings.values_mut() {
            if setting.sync_scope(store)? == crate::settings::Scope::PerProfile {
                per_profile += 1;
            }
        }
        tracing::debug!(per_profile, "已同步设置 scope");
        Ok(per_profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::setting::Setting;
    use crate::settings::value::SettingType;

    #[test]
    fn test_from_catalog() {
        let registry = SettingRegistry::from_catalog();
        assert_eq!(registry.len(), catalog::ENTRIES.len());
        assert_eq!(
            registry.get("custom_rtc").map(AnySetting::setting_type),
            Some(SettingType::Long)
        );
        assert_eq!(registry.keys().next(), Some(catalog::ENTRIES[0].key));
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let mut registry = SettingRegistry::new();
        registry.register(Setting::<String>::new("device_name")).expect("first");
        let err = registry
            .register(Setting::<bool>::new("device_name"))
            .expect_err("duplicate");
        assert!(matches!(err, SettingError::DuplicateKey(k) if k == "device_name"));
    }

    #[test]
    fn test_require_unknown() {
        let registry = SettingRegistry::new();
        assert!(matches!(
            registry.require("nope"),
            Err(SettingError::UnknownSetting(_))
        ));
    }
}

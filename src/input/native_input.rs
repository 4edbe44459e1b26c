// ==========================================
// 模拟器设置层 - 原生输入接口
// ==========================================
// 职责: 定义绑定界面读写按键/摇杆参数所需的接口
// 实现者: StoreInput（把参数包序列化后存入 String 设置）
// ==========================================

use crate::input::model::{NativeAnalog, NativeButton};
use crate::param::ParamPackage;
use crate::settings::catalog::{button_binding_key, stick_binding_key};
use crate::settings::error::SettingResult;
use crate::settings::setting::{ReadScope, Setting};
use crate::store::backing_store::BackingStore;
use std::collections::HashMap;

// ==========================================
// NativeInput Trait
// ==========================================
pub trait NativeInput {
    fn button_param(&self, player_index: usize, button: NativeButton) -> SettingResult<ParamPackage>;

    fn set_button_param(
        &mut self,
        player_index: usize,
        button: NativeButton,
        param: &ParamPackage,
    ) -> SettingResult<()>;

    fn stick_param(&self, player_index: usize, analog: NativeAnalog) -> SettingResult<ParamPackage>;

    fn set_stick_param(
        &mut self,
        player_index: usize,
        analog: NativeAnalog,
        param: &ParamPackage,
    ) -> SettingResult<()>;
}

// ==========================================
// StoreInput
// ==========================================

/// 基于后备存储的输入绑定
///
/// 每个绑定对应一个 String 设置，因此绑定写入同样遵循全局/按游戏覆写规则。
pub struct StoreInput<'a> {
    store: &'a dyn BackingStore,
    bindings: HashMap<String, Setting<String>>,
}

impl<'a> StoreInput<'a> {
    pub fn new(store: &'a dyn BackingStore) -> Self {
        Self {
            store,
            bindings: HashMap::new(),
        }
    }

    fn read(&self, key: String) -> SettingResult<ParamPackage> {
        let raw = match self.bindings.get(&key) {
            Some(setting) => setting.get(self.store, ReadScope::AsConfigured)?,
            None => {
                // 尚未写过的绑定：按存储中的覆写记录确定 scope
                let mut setting = Setting::<String>::new(key);
                setting.sync_scope(self.store)?;
                setting.get(self.store, ReadScope::AsConfigured)?
            }
        };
        Ok(ParamPackage::parse(&raw))
    }

    fn write(&mut self, key: String, param: &ParamPackage) -> SettingResult<()> {
        let store = self.store;
        let setting = match self.bindings.entry(key) {
            std::collections::hash_map::Entry::Occupied(e) => e.into_mut(),
            std::collections::hash_map::Entry::Vacant(e) => {
                let mut setting = Setting::<String>::new(e.key().clone());
                setting.sync_scope(store)?;
                e.insert(setting)
            }
        };
        tracing::debug!(key = %setting.key(), "写入输入绑定");
        setting.set(store, param.serialize())
    }

    /// 撤销某个按键绑定的按游戏覆写
    pub fn revert_button(&mut self, player_index: usize, button: NativeButton) -> SettingResult<bool> {
        let key = button_binding_key(player_index, button);
        let mut setting = self
            .bindings
            .remove(&key)
            .unwrap_or_else(|| Setting::new(key));
        setting.revert_to_global(self.store)
    }
}

impl NativeInput for StoreInput<'_> {
    fn button_param(&self, player_index: usize, button: NativeButton) -> SettingResult<ParamPackage> {
        self.read(button_binding_key(player_index, button))
    }

    fn set_button_param(
        &mut self,
        player_index: usize,
        button: NativeButton,
        param: &ParamPackage,
    ) -> SettingResult<()> {
        self.write(button_binding_key(player_index, button), param)
    }

    fn stick_param(&self, player_index: usize, analog: NativeAnalog) -> SettingResult<ParamPackage> {
        self.read(stick_binding_key(player_index, analog))
    }

    fn set_stick_param(
        &mut self,
        player_index: usize,
        analog: NativeAnalog,
        param: &ParamPackage,
    ) -> SettingResult<()> {
        self.write(stick_binding_key(player_index, analog), param)
    }
}

// ==========================================
// 模拟器设置层 - 默认值表
// ==========================================
// 职责: 存储侧的 "key -> 默认值文本" 查询，由设置目录初始化
// ==========================================

use crate::settings::catalog;
use crate::store::error::{StoreError, StoreResult};
use indexmap::IndexMap;
use std::sync::RwLock;

/// 默认值表
///
/// 运行期允许替换某个默认值；已经缓存过默认值的 Setting 不会感知变化。
#[derive(Debug, Default)]
pub struct DefaultTable {
    entries: RwLock<IndexMap<String, String>>,
}

impl DefaultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由完整设置目录（含输入绑定 key）构建
    pub fn from_catalog() -> Self {
        let table = Self::new();
        if let Ok(mut entries) = table.entries.write() {
            for (key, default) in catalog::default_entries() {
                entries.insert(key, default);
            }
        }
        table
    }

    pub fn get(&self, key: &str) -> StoreResult<String> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::UnknownKey(key.to_string()))
    }

    /// 声明或替换默认值
    pub fn set(&self, key: impl Into<String>, default: impl Into<String>) -> StoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        entries.insert(key.into(), default.into());
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

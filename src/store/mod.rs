// ==========================================
// 模拟器设置层 - 后备存储
// ==========================================
// 职责: 全局层 + 按游戏（profile）覆写层的 key/value 存储契约及实现
// 实现: SqliteStore（config_kv 表）、MemoryStore（进程内）
// ==========================================

pub mod backing_store;
pub mod defaults;
pub mod error;
pub mod memory_store;
pub mod sqlite_store;

pub use backing_store::{BackingStore, Layer, ProfileContext, ProfileId, TypedStoreExt};
pub use defaults::DefaultTable;
pub use error::{StoreError, StoreResult};
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;

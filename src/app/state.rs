// ==========================================
// 模拟器设置层 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态（存储 + 设置注册表）
// 并发: 注册表本身不加锁，这里在集成边界用 Mutex 串行化访问
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use crate::settings::{SettingError, SettingRegistry, SettingResult};
use crate::store::{ProfileId, SqliteStore, StoreResult};

/// 应用状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 后备存储
    pub store: Arc<SqliteStore>,

    /// 设置注册表
    registry: Mutex<SettingRegistry>,
}

impl AppState {
    /// 创建新的应用状态
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: String) -> StoreResult<Self> {
        tracing::info!("初始化设置存储: {}", db_path);
        let store = Arc::new(SqliteStore::open(&db_path)?);
        let registry = SettingRegistry::from_catalog();
        tracing::info!(settings = registry.len(), "设置注册表已加载");

        Ok(Self {
            db_path,
            store,
            registry: Mutex::new(registry),
        })
    }

    /// 获取注册表（调用方持锁期间完成一次完整的读写）
    pub fn registry(&self) -> SettingResult<MutexGuard<'_, SettingRegistry>> {
        self.registry
            .lock()
            .map_err(|e| SettingError::RegistryLock(e.to_string()))
    }

    /// 加载按游戏配置，并按存储中的覆写记录同步各设置的 scope
    ///
    /// # 返回
    /// - Ok(usize): 当前 profile 下处于覆写状态的设置数
    pub fn load_profile(&self, profile: ProfileId) -> SettingResult<usize> {
        let mut registry = self.registry()?;
        self.store
            .load_profile(profile.clone())
            .map_err(|e| SettingError::store(profile.as_str(), e))?;
        registry.sync_scopes(self.store.as_ref())
    }

    /// 卸载按游戏配置（scope 保持不变，读取自动回到全局层）
    pub fn unload_profile(&self) -> StoreResult<()> {
        self.store.unload_profile()
    }
}

/// 获取默认数据库路径
///
/// 优先级：
/// 1. 环境变量 EMU_SETTINGS_DB_PATH
/// 2. 用户数据目录下的 emu-settings[-dev]/settings.db
/// 3. 当前目录 ./emu_settings.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("EMU_SETTINGS_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./emu_settings.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染正式配置
        let dir = if cfg!(debug_assertions) {
            data_dir.join("emu-settings-dev")
        } else {
            data_dir.join("emu-settings")
        };

        // 确保目录存在；失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("settings.db");
        }
    }

    path.to_string_lossy().to_string()
}

// ==========================================
// 模拟器设置层 - SQLite 存储
// ==========================================
// 存储: config_kv 表 (scope_id + key -> value)
// scope: 'global' 为全局层；'profile/{id}' 为按游戏覆写层
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::store::backing_store::{BackingStore, Layer, ProfileContext, ProfileId};
use crate::store::defaults::DefaultTable;
use crate::store::error::{StoreError, StoreResult};
use indexmap::IndexMap;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// 快照中的元信息 key 前缀（恢复时跳过）
pub const SNAPSHOT_META_PREFIX: &str = "__meta_";

// ==========================================
// SqliteStore
// ==========================================
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    context: RwLock<ProfileContext>,
    defaults: DefaultTable,
}

impl SqliteStore {
    /// 打开（或创建）数据库，并使用给定默认值表
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - defaults: 默认值表（通常为 DefaultTable::from_catalog()）
    pub fn new(db_path: &str, defaults: DefaultTable) -> StoreResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)), defaults)
    }

    /// 打开数据库并使用完整设置目录的默认值
    pub fn open(db_path: &str) -> StoreResult<Self> {
        Self::new(db_path, DefaultTable::from_catalog())
    }

    /// 从已有连接创建（会幂等建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>, defaults: DefaultTable) -> StoreResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::LockError(e.to_string()))?;
            ensure_schema(&guard)?;
        }

        Ok(Self {
            conn,
            context: RwLock::new(ProfileContext::Inactive),
            defaults,
        })
    }

    pub fn defaults(&self) -> &DefaultTable {
        &self.defaults
    }

    fn get_conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }

    /// 确保 config_scope 中存在该层的记录（config_kv 外键依赖）
    fn ensure_scope(conn: &Connection, layer: &Layer) -> StoreResult<()> {
        if let Layer::Profile(id) = layer {
            conn.execute(
                "INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key) VALUES (?1, 'PROFILE', ?2)",
                params![layer.scope_id(), id.as_str()],
            )?;
        }
        Ok(())
    }

    // ===== profile 上下文 =====

    /// 加载按游戏配置上下文
    ///
    /// 上下文切换在写锁内完成，设置层读取到的总是切换前或切换后的完整状态。
    pub fn load_profile(&self, profile: ProfileId) -> StoreResult<()> {
        {
            let conn = self.get_conn()?;
            Self::ensure_scope(&conn, &Layer::Profile(profile.clone()))?;
        }
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
        let mut ctx = self
            .context
            .write()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        tracing::info!("卸载按游戏配置上下文");
        *ctx = ProfileContext::Inactive;
        Ok(())
    }

    /// 列出所有已知 profile
    pub fn list_profiles(&self) -> StoreResult<Vec<ProfileId>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT scope_key FROM config_scope WHERE scope_type = 'PROFILE' ORDER BY scope_key",
        )?;
        let profiles = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(profiles.into_iter().map(ProfileId::new).collect())
    }

    /// 清除某个 profile 的全部覆写
    ///
    /// # 返回
    /// - Ok(usize): 删除的覆写条数
    pub fn clear_profile(&self, profile: &ProfileId) -> StoreResult<usize> {
        let conn = self.get_conn()?;
        let removed = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1",
            params![Layer::Profile(profile.clone()).scope_id()],
        )?;
        tracing::info!(profile = %profile, removed, "已清除按游戏覆写");
        Ok(removed)
    }

    // ===== 快照 =====

    /// 获取某一层全部配置的快照（JSON 格式）
    ///
    /// # 用途
    /// - 导出/备份按游戏配置
    /// - 在不同设备间迁移配置
    pub fn snapshot(&self, layer: &Layer) -> StoreResult<String> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let mut config_map: IndexMap<String, String> = IndexMap::new();
        config_map.insert(format!("{}scope_id", SNAPSHOT_META_PREFIX), layer.scope_id());
        config_map.insert(
            format!("{}exported_at", SNAPSHOT_META_PREFIX),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );

        let rows = stmt.query_map(params![layer.scope_id()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 从快照恢复某一层的配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    ///
    /// # 注意
    /// - 覆盖该层同名 key；快照中没有的 key 保持不变
    /// - `__meta_` 开头的元信息不会回写
    pub fn restore_snapshot(&self, layer: &Layer, snapshot_json: &str) -> StoreResult<usize> {
        let config_map: IndexMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.get_conn()?;
        Self::ensure_scope(&conn, layer)?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            if key.starts_with(SNAPSHOT_META_PREFIX) {
                continue;
            }
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
                params![layer.scope_id(), key, value],
            )?;
        }

        tx.commit()?;
        tracing::info!(layer = %layer, count, "已从快照恢复配置");
        Ok(count)
    }
}

impl BackingStore for SqliteStore {
    fn profile_context(&self) -> StoreResult<ProfileContext> {
        let ctx = self
            .context
            .read()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(ctx.clone())
    }

    fn read_raw(&self, key: &str, layer: &Layer) -> StoreResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![layer.scope_id(), key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, key: &str, layer: &Layer, value: &str) -> StoreResult<()> {
        let conn = self.get_conn()?;
        Self::ensure_scope(&conn, layer)?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            params![layer.scope_id(), key, value],
        )?;
        tracing::debug!(key = %key, layer = %layer, "写入配置");
        Ok(())
    }

    fn remove_raw(&self, key: &str, layer: &Layer) -> StoreResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![layer.scope_id(), key],
        )?;
        Ok(affected > 0)
    }

    fn default_as_string(&self, key: &str) -> StoreResult<String> {
        self.defaults.get(key)
    }
}

// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、存储构建等功能
// ==========================================

#![allow(dead_code)]

use emu_settings::db::{ensure_schema, open_sqlite_connection};
use emu_settings::store::{DefaultTable, SqliteStore};
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    ensure_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接（已配置 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 在测试数据库上打开使用完整设置目录默认值的存储
pub fn open_test_store(db_path: &str) -> Result<SqliteStore, Box<dyn Error>> {
    Ok(SqliteStore::open(db_path)?)
}

/// 在测试数据库上打开使用自定义默认值的存储
pub fn open_store_with_defaults(
    db_path: &str,
    defaults: &[(&str, &str)],
) -> Result<SqliteStore, Box<dyn Error>> {
    let table = DefaultTable::new();
    for (key, default) in defaults {
        table.set(*key, *default)?;
    }
    Ok(SqliteStore::new(db_path, table)?)
}

/// 直接读取 config_kv 中的原始值
pub fn raw_value(conn: &Connection, scope_id: &str, key: &str) -> Result<Option<String>, Box<dyn Error>> {
    let mut stmt = conn.prepare("SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2")?;
    let mut rows = stmt.query(rusqlite::params![scope_id, key])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

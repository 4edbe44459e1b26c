// ==========================================
// 模拟器设置层 - 存储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 存储层错误类型
///
/// 这里只放"存储本身出了问题"的情况；key 缺失、值无法解析属于软缺失，
/// 不经过这个类型。
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("后备存储不可用: {0}")]
    Unavailable(String),

    #[error("存储锁获取失败: {0}")]
    LockError(String),

    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("目录中未声明默认值: key={0}")]
    UnknownKey(String),

    #[error("配置快照格式错误: {0}")]
    SnapshotFormat(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, msg)
                if matches!(
                    code.code,
                    rusqlite::ErrorCode::CannotOpen | rusqlite::ErrorCode::NotADatabase
                ) =>
            {
                StoreError::Unavailable(msg.clone().unwrap_or_else(|| code.to_string()))
            }
            _ => StoreError::DatabaseError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SnapshotFormat(err.to_string())
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;

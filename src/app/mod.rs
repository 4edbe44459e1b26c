// ==========================================
// 模拟器设置层 - 应用层
// ==========================================
// 职责: 组装存储与设置注册表，供前端/CLI 使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};

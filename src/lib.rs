// ==========================================
// 模拟器设置层 - 核心库
// ==========================================
// 职责: 输入参数包编解码 + 全局/按游戏设置覆写解析
// 技术栈: Rust + SQLite
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 参数包 - 输入绑定的 key/value 编码
pub mod param;

// 后备存储 - 分层 key/value 存储与默认值表
pub mod store;

// 设置层 - 类型化设置与 scope 解析
pub mod settings;

// 输入绑定 - 绑定界面使用的设置项
pub mod input;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use param::{ParamPackage, ParamValue};

pub use store::{
    BackingStore, DefaultTable, Layer, MemoryStore, ProfileContext, ProfileId, SqliteStore,
    StoreError, StoreResult, TypedStoreExt,
};

pub use settings::{
    AnySetting, ReadScope, Scope, Setting, SettingError, SettingRegistry, SettingResult,
    SettingType, SettingValue,
};

pub use input::{InputSetting, NativeAnalog, NativeButton, NativeInput, Selection, StoreInput};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "emu-settings";

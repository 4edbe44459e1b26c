// ==========================================
// 模拟器设置层 - 设置
// ==========================================
// 职责: 类型化设置（Bool/Int/Float/Long/String）的全局/按游戏覆写解析
// 组成: Setting<T>（解析逻辑只写一次）+ AnySetting（五种类型的标签联合）
//       + SettingRegistry（设置目录）
// ==========================================

pub mod any_setting;
pub mod catalog;
pub mod error;
pub mod registry;
pub mod setting;
pub mod value;

pub use any_setting::AnySetting;
pub use error::{SettingError, SettingResult};
pub use registry::SettingRegistry;
pub use setting::{ReadScope, Scope, Setting};
pub use value::{SettingType, SettingValue};

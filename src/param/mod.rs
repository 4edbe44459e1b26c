// ==========================================
// 模拟器设置层 - 参数包 (ParamPackage)
// ==========================================
// 职责: 扁平的 key/value 结构化值，以及它的规范文本编码
// 用途: 输入绑定等多字段值序列化后存入单个 String 设置
// ==========================================

pub mod codec;
pub mod package;

pub use codec::{
    escape, unescape, ESCAPE_CHARACTER, EMPTY_PLACEHOLDER, KEY_VALUE_SEPARATOR, PARAM_SEPARATOR,
};
pub use package::{ParamPackage, ParamValue};

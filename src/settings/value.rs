// ==========================================
// 模拟器设置层 - 设置值类型
// ==========================================
// 职责: 五种原始类型的解析与格式化
// 约束: encode 既用于持久化也用于展示，保证显示与存储口径一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 设置的原始类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    Bool,
    Int,
    Float,
    Long,
    String,
}

impl SettingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingType::Bool => "bool",
            SettingType::Int => "int",
            SettingType::Float => "float",
            SettingType::Long => "long",
            SettingType::String => "string",
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 可作为设置值的原始类型
pub trait SettingValue: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const TYPE: SettingType;

    /// 解析存储文本；无法解析返回 None
    fn decode(raw: &str) -> Option<Self>;

    /// 规范文本（持久化与展示共用）
    fn encode(&self) -> String;

    /// 能否写入存储（encode 的结果必须能被 decode 读回）
    fn is_storable(&self) -> bool {
        true
    }
}

impl SettingValue for bool {
    const TYPE: SettingType = SettingType::Bool;

    fn decode(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl SettingValue for i32 {
    const TYPE: SettingType = SettingType::Int;

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl SettingValue for f32 {
    const TYPE: SettingType = SettingType::Float;

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
    }

    fn encode(&self) -> String {
        self.to_string()
    }

    fn is_storable(&self) -> bool {
        self.is_finite()
    }
}

impl SettingValue for i64 {
    const TYPE: SettingType = SettingType::Long;

    fn decode(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

impl SettingValue for String {
    const TYPE: SettingType = SettingType::String;

    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_decode_variants() {
        assert_eq!(bool::decode("true"), Some(true));
        assert_eq!(bool::decode(" FALSE "), Some(false));
        assert_eq!(bool::decode("1"), Some(true));
        assert_eq!(bool::decode("yes"), None);
        assert_eq!(true.encode(), "true");
    }

    #[test]
    fn test_numeric_decode() {
        assert_eq!(i32::decode(" 42 "), Some(42));
        assert_eq!(i32::decode("4.2"), None);
        assert_eq!(i64::decode("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(f32::decode("0.25"), Some(0.25));
        assert_eq!(f32::decode("NaN"), None);
    }

    #[test]
    fn test_float_encode_round_trips() {
        for v in [0.0f32, 1.0, 0.1, 1.5e-7, 123456.78] {
            assert_eq!(f32::decode(&v.encode()), Some(v));
        }
    }

    #[test]
    fn test_string_is_verbatim() {
        assert_eq!(String::decode("  spaced  ").as_deref(), Some("  spaced  "));
    }
}

// ==========================================
// 模拟器设置层 - ParamPackage
// ==========================================
// 职责: 有序 key/value 映射 + 类型化读写 + 规范编码
// 红线: 读取永不失败（缺失或无法解析时返回调用方默认值）
// ==========================================

use crate::param::codec::{decode_pairs, encode_pairs};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

// ==========================================
// ParamValue - 参数包可读写的值类型
// ==========================================

/// 可存入参数包的值类型
///
/// 编码规则：字符串原样，整数/浮点用 `Display`，布尔用 "1"/"0"。
pub trait ParamValue: Sized {
    fn to_param(&self) -> String;
    fn from_param(raw: &str) -> Option<Self>;
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }

    fn from_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl ParamValue for i32 {
    fn to_param(&self) -> String {
        self.to_string()
    }

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ParamValue for i64 {
    fn to_param(&self) -> String {
        self.to_string()
    }

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ParamValue for f32 {
    fn to_param(&self) -> String {
        self.to_string()
    }

    // 与设置层一致：inf/NaN 视为无法解析
    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> String {
        if *self { "1" } else { "0" }.to_string()
    }

    fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }
}

// ==========================================
// ParamPackage
// ==========================================

/// 参数包
///
/// 保持插入顺序（编码顺序即插入顺序，覆写不改变位置）；
/// 相等性与顺序无关。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamPackage {
    data: IndexMap<String, String>,
}

impl ParamPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由键值对构建（按迭代顺序插入，空 key 被忽略）
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut package = Self::new();
        for (key, value) in pairs {
            let value: String = value.into();
            package.set(key, value);
        }
        package
    }

    /// 从规范文本解码（全函数，畸形片段静默丢弃）
    pub fn parse(serialized: &str) -> Self {
        let mut data = IndexMap::new();
        for (key, value) in decode_pairs(serialized) {
            data.insert(key, value);
        }
        Self { data }
    }

    /// 编码为规范文本；空包编码为空串
    pub fn serialize(&self) -> String {
        encode_pairs(self.data.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// 类型化读取
    ///
    /// key 缺失或值无法解析为 `T` 时返回 `default`。
    pub fn get<T: ParamValue>(&self, key: &str, default: T) -> T {
        match self.data.get(key) {
            Some(raw) => T::from_param(raw).unwrap_or(default),
            None => default,
        }
    }

    /// 借用方式读取字符串
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.data.get(key).map(String::as_str).unwrap_or(default)
    }

    /// 类型化写入（覆盖同名 key，保留其他 key）
    pub fn set<T: ParamValue>(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        if key.is_empty() {
            tracing::warn!("参数包不接受空 key，写入已忽略");
            return;
        }
        self.data.insert(key, value.to_param());
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// 删除 key，返回原始值（后续 key 顺序前移）
    pub fn erase(&mut self, key: &str) -> Option<String> {
        self.data.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ParamPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for ParamPackage {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ParamPackage {
    fn from(serialized: &str) -> Self {
        Self::parse(serialized)
    }
}

// 以规范文本形式参与 serde（例如配置快照 JSON 中）
impl Serialize for ParamPackage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ParamPackage::serialize(self))
    }
}

impl<'de> Deserialize<'de> for ParamPackage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

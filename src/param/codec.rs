// ==========================================
// 模拟器设置层 - 参数包文本编解码
// ==========================================
// 格式: key:value,key:value
// 转义: '$' -> "$2", ',' -> "$1", ':' -> "$0"（key 与 value 都转义）
// 说明: 与原生输入核心使用的参数串语法一致，写出的串原生侧可直接读取
// ==========================================

/// 键值对之间的分隔符
pub const PARAM_SEPARATOR: char = ',';

/// 键与值之间的分隔符
pub const KEY_VALUE_SEPARATOR: char = ':';

/// 转义引导字符
pub const ESCAPE_CHARACTER: char = '$';

/// 原生侧对空参数包使用的占位串（解码时视同空串）
pub const EMPTY_PLACEHOLDER: &str = "[empty]";

const KEY_VALUE_SEPARATOR_CODE: char = '0';
const PARAM_SEPARATOR_CODE: char = '1';
const ESCAPE_CHARACTER_CODE: char = '2';

/// 转义单个 key 或 value 中的保留字符
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            ESCAPE_CHARACTER => {
                out.push(ESCAPE_CHARACTER);
                out.push(ESCAPE_CHARACTER_CODE);
            }
            PARAM_SEPARATOR => {
                out.push(ESCAPE_CHARACTER);
                out.push(PARAM_SEPARATOR_CODE);
            }
            KEY_VALUE_SEPARATOR => {
                out.push(ESCAPE_CHARACTER);
                out.push(KEY_VALUE_SEPARATOR_CODE);
            }
            other => out.push(other),
        }
    }
    out
}

/// 反转义（单遍扫描）
///
/// 未知转义序列或结尾孤立的 '$' 原样保留，不报错。
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != ESCAPE_CHARACTER {
            out.push(ch);
            continue;
        }
        let decoded = match chars.peek() {
            Some(&KEY_VALUE_SEPARATOR_CODE) => Some(KEY_VALUE_SEPARATOR),
            Some(&PARAM_SEPARATOR_CODE) => Some(PARAM_SEPARATOR),
            Some(&ESCAPE_CHARACTER_CODE) => Some(ESCAPE_CHARACTER),
            _ => None,
        };
        match decoded {
            Some(c) => {
                out.push(c);
                chars.next();
            }
            None => out.push(ESCAPE_CHARACTER),
        }
    }
    out
}

/// 按给定顺序编码键值对；空序列编码为空串
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        if !out.is_empty() {
            out.push(PARAM_SEPARATOR);
        }
        out.push_str(&escape(key));
        out.push(KEY_VALUE_SEPARATOR);
        out.push_str(&escape(value));
    }
    out
}

/// 解码为键值对序列（全函数，不会失败）
///
/// 丢弃的片段:
/// - 未按原始 ':' 恰好切成两段（缺分隔符或含未转义的 ':'）
/// - key 为空
pub fn decode_pairs(serialized: &str) -> Vec<(String, String)> {
    if serialized.is_empty() || serialized == EMPTY_PLACEHOLDER {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    for fragment in serialized.split(PARAM_SEPARATOR) {
        let parts: Vec<&str> = fragment.split(KEY_VALUE_SEPARATOR).collect();
        if parts.len() != 2 {
            tracing::debug!(fragment = %fragment, "参数包片段无效，已丢弃");
            continue;
        }
        let key = unescape(parts[0]);
        if key.is_empty() {
            tracing::debug!(fragment = %fragment, "参数包片段 key 为空，已丢弃");
            continue;
        }
        pairs.push((key, unescape(parts[1])));
    }
    pairs
}

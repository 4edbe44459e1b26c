// ==========================================
// ParamPackage 集成测试
// ==========================================
// 测试目标: 验证参数包的文本编码与输入绑定场景
// ==========================================

use emu_settings::param::{escape, unescape, ParamPackage};

#[test]
fn test_keyboard_binding_round_trip() {
    let params = ParamPackage::from_pairs([("engine", "keyboard"), ("button", "37"), ("guid", "0")]);

    let serialized = params.serialize();
    assert_eq!(serialized, "engine:keyboard,button:37,guid:0");

    let decoded = ParamPackage::parse(&serialized);
    assert_eq!(decoded, params, "decode should yield an equal mapping");
    assert_eq!(decoded.get_str("modifier", ""), "", "absent key should yield default");
    assert_eq!(decoded.get("button", 0), 37);
}

#[test]
fn test_reserved_characters_in_values() {
    // 设备名等任意文本可能包含保留字符
    let mut params = ParamPackage::new();
    params.set("display", "Pro Controller: left, $5".to_string());
    params.set("engine", "sdl".to_string());

    let serialized = params.serialize();
    assert_eq!(serialized.matches(',').count(), 1, "only the pair separator should remain unescaped");

    let decoded = ParamPackage::parse(&serialized);
    assert_eq!(decoded.get_str("display", ""), "Pro Controller: left, $5");
    assert_eq!(decoded, params);
}

#[test]
fn test_serialize_is_stable() {
    let params = ParamPackage::from_pairs([("engine", "sdl"), ("port", "1"), ("axis", "2")]);
    let once = params.serialize();
    let twice = ParamPackage::parse(&once).serialize();
    assert_eq!(once, twice, "serialize(parse(serialize(p))) should equal serialize(p)");
}

#[test]
fn test_equality_ignores_order() {
    let a = ParamPackage::parse("engine:keyboard,code:65");
    let b = ParamPackage::parse("code:65,engine:keyboard");
    assert_eq!(a, b);
    assert_ne!(a.serialize(), b.serialize(), "serialization follows insertion order");
}

#[test]
fn test_garbage_input_never_fails() {
    for raw in ["", "[empty]", ",,,", "no_separator", ":value_only", "a:b:c", "$$$:1,ok:2"] {
        let params = ParamPackage::parse(raw);
        // 任何输入都能解析，且不会产生空 key
        assert!(params.iter().all(|(k, _)| !k.is_empty()), "empty key from {:?}", raw);
    }
    assert_eq!(ParamPackage::parse("a:b:c,ok:2").serialize(), "ok:2");
}

#[test]
fn test_empty_package() {
    assert_eq!(ParamPackage::new().serialize(), "");
    assert!(ParamPackage::parse("").is_empty());
    assert!(ParamPackage::parse("[empty]").is_empty());
}

#[test]
fn test_nested_package_survives_escaping() {
    // 摇杆参数中嵌套修饰键参数包
    let modifier = ParamPackage::from_pairs([("engine", "keyboard"), ("code", "16")]);
    let mut stick = ParamPackage::from_pairs([("engine", "analog_from_button")]);
    stick.set("modifier", modifier.serialize());

    let decoded = ParamPackage::parse(&stick.serialize());
    assert_eq!(ParamPackage::parse(decoded.get_str("modifier", "")), modifier);
}

#[test]
fn test_escape_helpers() {
    let raw = "a,b:c$d";
    assert_eq!(unescape(&escape(raw)), raw);
    assert!(!escape(raw).contains(','));
    assert!(!escape(raw).contains(':'));
}

#[test]
fn test_reserved_characters_in_keys() {
    let mut params = ParamPackage::new();
    params.set("a:b,c$", "plain".to_string());
    params.set("$0", "literal escape text".to_string());
    params.set("engine", "keyboard".to_string());

    let decoded = ParamPackage::parse(&params.serialize());
    assert_eq!(decoded, params, "keys with reserved characters should survive");
    assert_eq!(decoded.get_str("a:b,c$", ""), "plain");
    assert_eq!(decoded.get_str("$0", ""), "literal escape text");
}

#[test]
fn test_typed_values_round_trip() {
    let mut params = ParamPackage::new();
    params.set("threshold", 0.35f32);
    params.set("deadzone", -1.5e-3f32);
    params.set("guid", 9_007_199_254_740_993i64);
    params.set("port", -4i32);
    params.set("toggle", true);
    params.set("inverted", false);

    let decoded = ParamPackage::parse(&params.serialize());
    assert_eq!(decoded, params);
    assert_eq!(decoded.get("threshold", 0.0f32), 0.35);
    assert_eq!(decoded.get("deadzone", 0.0f32), -1.5e-3);
    assert_eq!(decoded.get("guid", 0i64), 9_007_199_254_740_993);
    assert_eq!(decoded.get("port", 0i32), -4);
    assert!(decoded.get("toggle", false));
    assert!(!decoded.get("inverted", true));
}

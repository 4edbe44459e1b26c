// ==========================================
// 模拟器设置层 - 输入绑定展示文本
// ==========================================

use crate::input::model::AnalogDirection;
use crate::param::ParamPackage;

/// 绑定本身的文本（"Button 37"、"Hat 0 up"、"Axis 2+" 等）
///
/// 未绑定（空包或没有 engine）返回空串。
pub fn binding_text(params: &ParamPackage) -> String {
    if params.is_empty() || !params.has("engine") {
        return String::new();
    }

    let keyboard = params.get_str("engine", "") == "keyboard";
    let prefix = if params.get("toggle", false) { "~" } else { "" };

    if params.has("code") {
        return format!("{}Key {}", prefix, params.get_str("code", ""));
    }

    if params.has("button") {
        let button = params.get_str("button", "");
        return if keyboard {
            format!("{}Key {}", prefix, button)
        } else {
            format!("{}Button {}", prefix, button)
        };
    }

    if params.has("hat") {
        let raw_direction = params.get_str("direction", "");
        let direction = AnalogDirection::from_param(raw_direction)
            .map(|d| d.param())
            .unwrap_or(raw_direction);
        return format!("{}Hat {} {}", prefix, params.get_str("hat", ""), direction);
    }

    if params.has("axis") {
        let sign = if params.get_str("invert", "+") == "-" { "-" } else { "+" };
        return format!("{}Axis {}{}", prefix, params.get_str("axis", ""), sign);
    }

    if params.has("motion") {
        return format!("Motion {}", params.get_str("motion", ""));
    }

    "Unknown".to_string()
}

/// 带设备名的完整展示文本
///
/// 设备名优先取参数包的 "display" 字段，否则按 engine 推断。
pub fn display_string(params: &ParamPackage, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let label = match params.get_str("display", "") {
        "" => match params.get_str("engine", "") {
            "keyboard" => "Keyboard".to_string(),
            "android" | "sdl" => "Controller".to_string(),
            other => other.to_string(),
        },
        display => display.to_string(),
    };

    if params.has("port") {
        format!("{} {}: {}", label, params.get("port", 0i32).saturating_add(1), text)
    } else {
        format!("{}: {}", label, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_is_empty() {
        assert_eq!(binding_text(&ParamPackage::new()), "");
        assert_eq!(display_string(&ParamPackage::new(), ""), "");
    }

    #[test]
    fn test_keyboard_button() {
        let p = ParamPackage::parse("engine:keyboard,button:37,guid:0");
        assert_eq!(binding_text(&p), "Key 37");
        assert_eq!(display_string(&p, &binding_text(&p)), "Keyboard: Key 37");
    }

    #[test]
    fn test_controller_variants() {
        let button = ParamPackage::parse("engine:android,port:0,button:96,display:Pro Controller");
        assert_eq!(binding_text(&button), "Button 96");
        assert_eq!(
            display_string(&button, &binding_text(&button)),
            "Pro Controller 1: Button 96"
        );

        let hat = ParamPackage::parse("engine:sdl,hat:0,direction:up");
        assert_eq!(binding_text(&hat), "Hat 0 up");

        let axis = ParamPackage::parse("engine:sdl,axis:2,invert:-");
        assert_eq!(binding_text(&axis), "Axis 2-");

        let toggled = ParamPackage::parse("engine:sdl,button:3,toggle:1");
        assert_eq!(binding_text(&toggled), "~Button 3");
    }

    #[test]
    fn test_port_at_integer_limit() {
        // 持久化数据中的端口号不可信
        let p = ParamPackage::parse("engine:sdl,port:2147483647,button:3");
        assert_eq!(
            display_string(&p, &binding_text(&p)),
            format!("Controller {}: Button 3", i32::MAX)
        );

        let negative = ParamPackage::parse("engine:sdl,port:-1,button:3");
        assert_eq!(display_string(&negative, "Button 3"), "Controller 0: Button 3");
    }
}

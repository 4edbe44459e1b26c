// ==========================================
// 模拟器设置层 - 输入模型
// ==========================================
// 说明: 枚举顺序须与原生核心的 settings_input 定义一致
// ==========================================

use serde::{Deserialize, Serialize};

/// 绑定对话框需要的输入类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    None,
    Button,
    Stick,
    Motion,
    Touch,
}

/// 原生按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeButton {
    A,
    B,
    X,
    Y,
    LStick,
    RStick,
    L,
    R,
    ZL,
    ZR,
    Plus,
    Minus,
    DLeft,
    DUp,
    DRight,
    DDown,
    SLLeft,
    SRLeft,
    Home,
    Screenshot,
    SLRight,
    SRRight,
}

impl NativeButton {
    pub const ALL: [NativeButton; 22] = [
        NativeButton::A,
        NativeButton::B,
        NativeButton::X,
        NativeButton::Y,
        NativeButton::LStick,
        NativeButton::RStick,
        NativeButton::L,
        NativeButton::R,
        NativeButton::ZL,
        NativeButton::ZR,
        NativeButton::Plus,
        NativeButton::Minus,
        NativeButton::DLeft,
        NativeButton::DUp,
        NativeButton::DRight,
        NativeButton::DDown,
        NativeButton::SLLeft,
        NativeButton::SRLeft,
        NativeButton::Home,
        NativeButton::Screenshot,
        NativeButton::SLRight,
        NativeButton::SRRight,
    ];

    /// 原生核心中的数值
    pub fn native_id(&self) -> i32 {
        *self as i32
    }

    pub fn param_name(&self) -> &'static str {
        match self {
            NativeButton::A => "a",
            NativeButton::B => "b",
            NativeButton::X => "x",
            NativeButton::Y => "y",
            NativeButton::LStick => "lstick",
            NativeButton::RStick => "rstick",
            NativeButton::L => "l",
            NativeButton::R => "r",
            NativeButton::ZL => "zl",
            NativeButton::ZR => "zr",
            NativeButton::Plus => "plus",
            NativeButton::Minus => "minus",
            NativeButton::DLeft => "dleft",
            NativeButton::DUp => "dup",
            NativeButton::DRight => "dright",
            NativeButton::DDown => "ddown",
            NativeButton::SLLeft => "slleft",
            NativeButton::SRLeft => "srleft",
            NativeButton::Home => "home",
            NativeButton::Screenshot => "screenshot",
            NativeButton::SLRight => "slright",
            NativeButton::SRRight => "srright",
        }
    }

    pub fn from_native_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}

/// 原生摇杆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeAnalog {
    LStick,
    RStick,
}

impl NativeAnalog {
    pub const ALL: [NativeAnalog; 2] = [NativeAnalog::LStick, NativeAnalog::RStick];

    pub fn native_id(&self) -> i32 {
        *self as i32
    }

    pub fn param_name(&self) -> &'static str {
        match self {
            NativeAnalog::LStick => "lstick",
            NativeAnalog::RStick => "rstick",
        }
    }
}

/// 摇杆/方向键方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalogDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AnalogDirection {
    pub const ALL: [AnalogDirection; 4] = [
        AnalogDirection::Up,
        AnalogDirection::Down,
        AnalogDirection::Left,
        AnalogDirection::Right,
    ];

    pub fn native_id(&self) -> i32 {
        *self as i32
    }

    /// 参数包中使用的方向名
    pub fn param(&self) -> &'static str {
        match self {
            AnalogDirection::Up => "up",
            AnalogDirection::Down => "down",
            AnalogDirection::Left => "left",
            AnalogDirection::Right => "right",
        }
    }

    pub fn from_param(param: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.param() == param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_ids_follow_declaration_order() {
        for (i, b) in NativeButton::ALL.iter().enumerate() {
            assert_eq!(b.native_id(), i as i32);
            assert_eq!(NativeButton::from_native_id(i as i32), Some(*b));
        }
        assert_eq!(NativeButton::from_native_id(-1), None);
        assert_eq!(NativeButton::from_native_id(22), None);
        assert_eq!(NativeAnalog::RStick.native_id(), 1);
    }

    #[test]
    fn test_direction_params() {
        assert_eq!(AnalogDirection::Left.native_id(), 2);
        assert_eq!(AnalogDirection::from_param("right"), Some(AnalogDirection::Right));
        assert_eq!(AnalogDirection::from_param("north"), None);
    }
}

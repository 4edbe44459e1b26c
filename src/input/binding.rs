// ==========================================
// 模拟器设置层 - 输入设置项
// ==========================================
// 职责: 绑定界面中三类需要输入的设置项
// - Button: 玩家 + 原生按键
// - AnalogModifier: 玩家 + 原生摇杆（修饰键存于摇杆参数的 "modifier" 字段）
// - StringValue: 直接输入文本的 String 设置
// ==========================================

use crate::input::display::{binding_text, display_string};
use crate::input::model::{InputType, NativeAnalog, NativeButton};
use crate::input::native_input::NativeInput;
use crate::param::ParamPackage;
use crate::settings::error::{SettingError, SettingResult};
use crate::settings::setting::{ReadScope, Setting};
use crate::store::backing_store::BackingStore;

/// 摇杆参数中保存修饰键绑定的字段
pub const MODIFIER_PARAM: &str = "modifier";

/// 绑定界面提交的选择
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// 捕获到的输入（按键/摇杆类设置项）
    Param(ParamPackage),
    /// 文本输入（StringValue 设置项）
    Text(String),
}

#[derive(Debug, Clone)]
pub enum InputSetting {
    Button {
        player_index: usize,
        button: NativeButton,
    },
    AnalogModifier {
        player_index: usize,
        analog: NativeAnalog,
    },
    StringValue(Setting<String>),
}

impl InputSetting {
    /// 绑定对话框需要捕获的输入类别；文本项不需要捕获
    pub fn input_type(&self) -> InputType {
        match self {
            InputSetting::Button { .. } | InputSetting::AnalogModifier { .. } => InputType::Button,
            InputSetting::StringValue(_) => InputType::None,
        }
    }

    /// 用于日志/错误的标识
    pub fn key(&self) -> String {
        match self {
            InputSetting::Button { player_index, button } => {
                crate::settings::catalog::button_binding_key(*player_index, *button)
            }
            InputSetting::AnalogModifier { player_index, analog } => format!(
                "{}/{}",
                crate::settings::catalog::stick_binding_key(*player_index, *analog),
                MODIFIER_PARAM
            ),
            InputSetting::StringValue(setting) => setting.key().to_string(),
        }
    }

    /// 当前选择的展示文本
    pub fn selected_value(
        &self,
        input: &dyn NativeInput,
        store: &dyn BackingStore,
        scope: ReadScope,
    ) -> SettingResult<String> {
        match self {
            InputSetting::Button { player_index, button } => {
                let params = input.button_param(*player_index, *button)?;
                let text = binding_text(&params);
                Ok(display_string(&params, &text))
            }
            InputSetting::AnalogModifier { player_index, analog } => {
                let modifier = self.modifier_param(input, *player_index, *analog)?;
                Ok(binding_text(&modifier))
            }
            InputSetting::StringValue(setting) => setting.display_string(store, scope),
        }
    }

    /// 提交新的选择
    ///
    /// 选择类型与设置项不匹配时返回 SelectionMismatch，不写入任何内容。
    pub fn apply(
        &mut self,
        input: &mut dyn NativeInput,
        store: &dyn BackingStore,
        selection: Selection,
    ) -> SettingResult<()> {
        let key = self.key();
        match (self, selection) {
            (InputSetting::Button { player_index, button }, Selection::Param(param)) => {
                input.set_button_param(*player_index, *button, &param)
            }
            (InputSetting::AnalogModifier { player_index, analog }, Selection::Param(param)) => {
                let mut stick = input.stick_param(*player_index, *analog)?;
                stick.set(MODIFIER_PARAM, param.serialize());
                input.set_stick_param(*player_index, *analog, &stick)
            }
            (InputSetting::StringValue(setting), Selection::Text(text)) => setting.set(store, text),
            (InputSetting::StringValue(_), Selection::Param(_)) => {
                Err(SettingError::SelectionMismatch { key, expected: "text" })
            }
            (_, Selection::Text(_)) => Err(SettingError::SelectionMismatch { key, expected: "param" }),
        }
    }

    /// 修饰键绑定（嵌套在摇杆参数中的序列化参数包）
    fn modifier_param(
        &self,
        input: &dyn NativeInput,
        player_index: usize,
        analog: NativeAnalog,
    ) -> SettingResult<ParamPackage> {
        let stick = input.stick_param(player_index, analog)?;
        Ok(ParamPackage::parse(stick.get_str(MODIFIER_PARAM, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::native_input::StoreInput;
    use crate::store::MemoryStore;

    #[test]
    fn test_input_types() {
        let button = InputSetting::Button {
            player_index: 0,
            button: NativeButton::A,
        };
        let text = InputSetting::StringValue(Setting::new("device_name"));
        assert_eq!(button.input_type(), InputType::Button);
        assert_eq!(text.input_type(), InputType::None);
        assert_eq!(button.key(), "player_0_button_a");
    }

    #[test]
    fn test_modifier_nested_in_stick_param() {
        let store = MemoryStore::with_catalog();
        let mut input = StoreInput::new(&store);

        let stick = ParamPackage::from_pairs([("engine", "analog_from_button"), ("up", "engine:keyboard,code:87")]);
        input
            .set_stick_param(0, NativeAnalog::LStick, &stick)
            .expect("seed stick");

        let mut modifier = InputSetting::AnalogModifier {
            player_index: 0,
            analog: NativeAnalog::LStick,
        };
        let shift = ParamPackage::from_pairs([("engine", "keyboard"), ("code", "16")]);
        modifier
            .apply(&mut input, &store, Selection::Param(shift.clone()))
            .expect("apply modifier");

        let saved = input.stick_param(0, NativeAnalog::LStick).expect("read stick");
        assert_eq!(saved.get_str("engine", ""), "analog_from_button");
        assert_eq!(saved.get_str("up", ""), "engine:keyboard,code:87");
        assert_eq!(ParamPackage::parse(saved.get_str(MODIFIER_PARAM, "")), shift);

        assert_eq!(
            modifier
                .selected_value(&input, &store, ReadScope::AsConfigured)
                .expect("display"),
            "Key 16"
        );
    }

    #[test]
    fn test_selection_mismatch_rejected() {
        let store = MemoryStore::with_catalog();
        let mut input = StoreInput::new(&store);
        let mut button = InputSetting::Button {
            player_index: 0,
            button: NativeButton::A,
        };
        let err = button
            .apply(&mut input, &store, Selection::Text("A".to_string()))
            .expect_err("mismatch");
        assert!(matches!(err, SettingError::SelectionMismatch { expected: "param", .. }));

        let mut text = InputSetting::StringValue(Setting::new("device_name"));
        let err = text
            .apply(&mut input, &store, Selection::Param(ParamPackage::new()))
            .expect_err("mismatch");
        assert!(matches!(err, SettingError::SelectionMismatch { expected: "text", .. }));
    }

    #[test]
    fn test_string_value_round_trip() {
        let store = MemoryStore::with_catalog();
        let mut input = StoreInput::new(&store);
        let mut text = InputSetting::StringValue(Setting::new("device_name"));
        text.apply(&mut input, &store, Selection::Text("Pro Controller".to_string()))
            .expect("apply");
        assert_eq!(
            text.selected_value(&input, &store, ReadScope::AsConfigured)
                .expect("display"),
            "Pro Controller"
        );
    }
}

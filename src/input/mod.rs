// ==========================================
// 模拟器设置层 - 输入绑定
// ==========================================
// 职责: 控制器输入绑定的读写与展示
// 存储: 每个绑定是一个序列化的 ParamPackage，存于 String 设置中
// ==========================================

pub mod binding;
pub mod display;
pub mod model;
pub mod native_input;

pub use binding::{InputSetting, Selection};
pub use display::{binding_text, display_string};
pub use model::{AnalogDirection, InputType, NativeAnalog, NativeButton};
pub use native_input::{NativeInput, StoreInput};

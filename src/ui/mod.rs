//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): 问题序列及应用状态
//! - View (view/): 将 State 映射为 UI
//! - Intent (actions.rs): 终端事件转化为语义化 Action
//! - widgets/: 各类问题控件，每个控件自己处理 Action 并返回 Outcome

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;
pub mod widgets;

// Re-export for convenience
pub use actions::Action;
pub use input::handle_event;
pub use state::{App, QuestionSequence};
pub use view::render;

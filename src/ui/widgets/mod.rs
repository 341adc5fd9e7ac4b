//! 问题控件
//!
//! 所有控件共享同一组能力：渲染、消费 Action、取答案、设置尺寸、获得/失去焦点。
//! `Question` 是封闭的枚举，按变体分发。

pub mod composite;
pub mod field;
pub mod key_value;
pub mod list;
pub mod text_input;

use ratatui::{Frame, layout::Rect};
use serde_json::Value;

use super::actions::Action;
use crate::error::Result;

pub use composite::CompositeField;
pub use field::{SelectField, TextField};
pub use key_value::KeyValueField;
pub use list::ListField;

/// 答案：字符串、字符串数组、字符串映射，或按键嵌套的对象
pub type Answer = Value;

/// 控件处理 Action 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 已消费并改变了状态
    Changed,
    /// 已消费但没有变化
    Unchanged,
    /// 与本控件无关，交给上层处理
    Ignored,
}

impl Outcome {
    pub fn is_consumed(self) -> bool {
        !matches!(self, Outcome::Ignored)
    }

    /// 合并两个并列控件的结果
    pub fn or(self, other: Outcome) -> Outcome {
        match (self, other) {
            (Outcome::Changed, _) | (_, Outcome::Changed) => Outcome::Changed,
            (Outcome::Unchanged, _) | (_, Outcome::Unchanged) => Outcome::Unchanged,
            _ => Outcome::Ignored,
        }
    }
}

/// 列表类控件的模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Adding,
    Editing,
    #[default]
    Unfocused,
}

impl Mode {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Mode::Adding => Some("adding"),
            Mode::Editing => Some("editing"),
            Mode::Unfocused => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Question {
    Text(TextField),
    Select(SelectField),
    List(ListField),
    KeyValue(KeyValueField),
    Composite(CompositeField),
}

impl Question {
    pub fn update(&mut self, action: &Action) -> Outcome {
        match self {
            Question::Text(q) => q.update(action),
            Question::Select(q) => q.update(action),
            Question::List(q) => q.update(action),
            Question::KeyValue(q) => q.update(action),
            Question::Composite(q) => q.update(action),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self {
            Question::Text(q) => q.render(frame, area),
            Question::Select(q) => q.render(frame, area),
            Question::List(q) => q.render(frame, area),
            Question::KeyValue(q) => q.render(frame, area),
            Question::Composite(q) => q.render(frame, area),
        }
    }

    /// 期望占用的行数
    pub fn height(&self) -> u16 {
        match self {
            Question::Text(q) => q.height(),
            Question::Select(q) => q.height(),
            Question::List(q) => q.height(),
            Question::KeyValue(q) => q.height(),
            Question::Composite(q) => q.height(),
        }
    }

    pub fn answer(&self) -> Answer {
        match self {
            Question::Text(q) => q.answer(),
            Question::Select(q) => q.answer(),
            Question::List(q) => q.answer(),
            Question::KeyValue(q) => q.answer(),
            Question::Composite(q) => q.answer(),
        }
    }

    /// 答案的序列化形式
    pub fn answer_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.answer())?)
    }

    pub fn set_bounds(&mut self, width: u16, height: u16) {
        match self {
            Question::Text(q) => q.set_bounds(width, height),
            Question::Select(q) => q.set_bounds(width, height),
            Question::List(q) => q.set_bounds(width, height),
            Question::KeyValue(q) => q.set_bounds(width, height),
            Question::Composite(q) => q.set_bounds(width, height),
        }
    }

    pub fn focus(&mut self) {
        match self {
            Question::Text(q) => q.focus(),
            Question::Select(q) => q.focus(),
            Question::List(q) => q.focus(),
            Question::KeyValue(q) => q.focus(),
            Question::Composite(q) => q.focus(),
        }
    }

    pub fn blur(&mut self) {
        match self {
            Question::Text(q) => q.blur(),
            Question::Select(q) => q.blur(),
            Question::List(q) => q.blur(),
            Question::KeyValue(q) => q.blur(),
            Question::Composite(q) => q.blur(),
        }
    }

    pub fn is_focused(&self) -> bool {
        match self {
            Question::Text(q) => q.is_focused(),
            Question::Select(q) => q.is_focused(),
            Question::List(q) => q.is_focused(),
            Question::KeyValue(q) => q.is_focused(),
            Question::Composite(q) => q.is_focused(),
        }
    }
}

impl From<TextField> for Question {
    fn from(q: TextField) -> Self {
        Question::Text(q)
    }
}

impl From<SelectField> for Question {
    fn from(q: SelectField) -> Self {
        Question::Select(q)
    }
}

impl From<ListField> for Question {
    fn from(q: ListField) -> Self {
        Question::List(q)
    }
}

impl From<KeyValueField> for Question {
    fn from(q: KeyValueField) -> Self {
        Question::KeyValue(q)
    }
}

impl From<CompositeField> for Question {
    fn from(q: CompositeField) -> Self {
        Question::Composite(q)
    }
}

/// 带键的问题，键在构造时给定，用作答案对象的字段名
#[derive(Debug, Clone)]
pub struct Entry {
    pub key: String,
    pub question: Question,
}

impl Entry {
    pub fn new(key: impl Into<String>, question: impl Into<Question>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
        }
    }
}

//! 单值问题：自由文本与单选

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};
use serde_json::Value;

use super::text_input::TextInput;
use super::{Answer, Outcome};
use crate::ui::actions::Action;
use crate::ui::view::components::{PROMPT_HEIGHT, items_height, render_items, render_prompt};

/// 自由文本问题
#[derive(Debug, Clone)]
pub struct TextField {
    prompt: String,
    input: TextInput,
}

impl TextField {
    pub fn new(prompt: impl Into<String>, default: impl Into<String>) -> Self {
        let mut input = TextInput::new();
        input.set_value(default);
        Self {
            prompt: prompt.into(),
            input,
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn update(&mut self, action: &Action) -> Outcome {
        self.input.update(action)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(PROMPT_HEIGHT), Constraint::Min(1)])
            .split(area);

        render_prompt(frame, chunks[0], &self.prompt, None);
        frame.render_widget(Paragraph::new(self.input.line()), chunks[1]);
    }

    pub fn height(&self) -> u16 {
        PROMPT_HEIGHT + 1
    }

    pub fn answer(&self) -> Answer {
        Value::String(self.input.value().to_string())
    }

    pub fn set_bounds(&mut self, width: u16, _height: u16) {
        self.input.set_width(width);
    }

    pub fn focus(&mut self) {
        self.input.focus();
    }

    pub fn blur(&mut self) {
        self.input.blur();
    }

    pub fn is_focused(&self) -> bool {
        self.input.is_focused()
    }
}

/// 单选问题，选项在构造后不再变化
#[derive(Debug, Clone)]
pub struct SelectField {
    prompt: String,
    options: Vec<String>,
    selected: usize,
    max_rows: u16,
    focused: bool,
}

impl SelectField {
    pub fn new<I, S>(prompt: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.into(),
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
            max_rows: u16::MAX,
            focused: false,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 当前选中的选项，没有选项时为空
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn update(&mut self, action: &Action) -> Outcome {
        let last = self.options.len().saturating_sub(1);
        match action {
            Action::SelectPrev | Action::Input('k') => self.select(self.selected.saturating_sub(1)),
            Action::SelectNext | Action::Input('j') => self.select((self.selected + 1).min(last)),
            Action::CursorHome => self.select(0),
            Action::CursorEnd => self.select(last),
            _ => Outcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(PROMPT_HEIGHT), Constraint::Min(1)])
            .split(area);

        render_prompt(frame, chunks[0], &self.prompt, None);
        render_items(frame, chunks[1], &self.options, Some(self.selected));
    }

    pub fn height(&self) -> u16 {
        PROMPT_HEIGHT + items_height(self.options.len(), self.max_rows)
    }

    pub fn answer(&self) -> Answer {
        Value::String(self.value().to_string())
    }

    pub fn set_bounds(&mut self, _width: u16, height: u16) {
        self.max_rows = height.saturating_sub(1);
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn select(&mut self, index: usize) -> Outcome {
        if index == self.selected {
            return Outcome::Unchanged;
        }
        self.selected = index;
        Outcome::Changed
    }
}

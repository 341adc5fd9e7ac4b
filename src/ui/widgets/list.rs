//! 动态有序列表问题
//!
//! 模式：
//! - Adding：Enter 把输入追加到末尾并清空输入
//! - Editing：Up/Down 选择条目，输入框同步为选中条目，Enter 原位替换，Delete 删除
//! - Unfocused：失去焦点
//!
//! Tab 在 Adding/Editing 之间切换，列表为空时不能进入 Editing。

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};
use serde_json::Value;

use super::text_input::TextInput;
use super::{Answer, Mode, Outcome};
use crate::ui::actions::Action;
use crate::ui::view::components::{PROMPT_HEIGHT, items_height, render_items, render_prompt};

#[derive(Debug, Clone)]
pub struct ListField {
    prompt: String,
    items: Vec<String>,
    selected: usize,
    input: TextInput,
    mode: Mode,
    max_rows: u16,
}

impl ListField {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            items: Vec::new(),
            selected: 0,
            input: TextInput::new(),
            mode: Mode::Unfocused,
            max_rows: u16::MAX,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 编辑缓冲区的当前内容
    pub fn buffer(&self) -> &str {
        self.input.value()
    }

    pub fn update(&mut self, action: &Action) -> Outcome {
        match action {
            Action::Delete => {
                if self.mode != Mode::Editing {
                    return Outcome::Unchanged;
                }
                self.remove_selected();
                Outcome::Changed
            }
            Action::Submit => self.commit(),
            Action::SelectPrev | Action::SelectNext => {
                if self.mode != Mode::Editing {
                    return Outcome::Unchanged;
                }
                let index = match action {
                    Action::SelectPrev => self.selected.saturating_sub(1),
                    _ => (self.selected + 1).min(self.items.len() - 1),
                };
                if index == self.selected {
                    return Outcome::Unchanged;
                }
                self.select(index);
                Outcome::Changed
            }
            Action::ToggleMode => self.switch_mode(),
            _ => self.input.update(action),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(PROMPT_HEIGHT),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(area);

        render_prompt(frame, chunks[0], &self.prompt, self.mode.label());
        frame.render_widget(Paragraph::new(self.input.line()), chunks[1]);
        let selected = (self.mode == Mode::Editing).then_some(self.selected);
        render_items(frame, chunks[2], &self.items, selected);
    }

    pub fn height(&self) -> u16 {
        PROMPT_HEIGHT + 1 + items_height(self.items.len(), self.max_rows)
    }

    pub fn answer(&self) -> Answer {
        Value::Array(self.items.iter().cloned().map(Value::String).collect())
    }

    pub fn set_bounds(&mut self, width: u16, height: u16) {
        self.input.set_width(width);
        self.max_rows = height.saturating_sub(5);
    }

    pub fn focus(&mut self) {
        self.input.focus();
        self.mode = Mode::Adding;
    }

    pub fn blur(&mut self) {
        self.input.blur();
        self.mode = Mode::Unfocused;
    }

    pub fn is_focused(&self) -> bool {
        self.mode != Mode::Unfocused
    }

    fn commit(&mut self) -> Outcome {
        let value = self.input.value().to_string();
        match self.mode {
            Mode::Adding => {
                tracing::debug!(prompt = %self.prompt, item = %value, "list item added");
                self.items.push(value);
                self.input.reset();
                Outcome::Changed
            }
            Mode::Editing => {
                tracing::debug!(prompt = %self.prompt, index = self.selected, "list item edited");
                self.items[self.selected] = value;
                Outcome::Changed
            }
            Mode::Unfocused => Outcome::Ignored,
        }
    }

    /// 删除选中条目；列表删空后回到 Adding
    fn remove_selected(&mut self) {
        self.items.remove(self.selected);
        if self.items.is_empty() {
            self.mode = Mode::Adding;
            self.selected = 0;
            self.input.reset();
        } else {
            self.select(self.selected.min(self.items.len() - 1));
        }
    }

    fn switch_mode(&mut self) -> Outcome {
        match self.mode {
            Mode::Editing => {
                self.mode = Mode::Adding;
                self.input.set_value("");
                Outcome::Changed
            }
            Mode::Adding if !self.items.is_empty() => {
                self.mode = Mode::Editing;
                self.select(0);
                Outcome::Changed
            }
            Mode::Adding => Outcome::Unchanged,
            Mode::Unfocused => Outcome::Ignored,
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.input.set_value(self.items[index].clone());
    }
}

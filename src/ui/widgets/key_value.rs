//! 键值列表问题
//!
//! 与列表问题相同的三态模式，但使用键、值两个输入框和一个映射。
//! 显示顺序由 `order` 保存，映射与显示顺序始终同步：
//! 提交已存在的键时原位替换，不会追加重复条目。

use std::collections::BTreeMap;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
};
use serde_json::{Map, Value};

use super::text_input::TextInput;
use super::{Answer, Mode, Outcome};
use crate::ui::actions::Action;
use crate::ui::view::components::{PROMPT_HEIGHT, items_height, render_items, render_prompt};

pub const KEY_VALUE_SEPARATOR: &str = " = ";

#[derive(Debug, Clone)]
pub struct KeyValueField {
    prompt: String,
    map: BTreeMap<String, String>,
    /// 显示顺序（键）
    order: Vec<String>,
    selected: usize,
    key_input: TextInput,
    value_input: TextInput,
    mode: Mode,
    max_rows: u16,
}

impl KeyValueField {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            map: BTreeMap::new(),
            order: Vec::new(),
            selected: 0,
            key_input: TextInput::new().with_placeholder("key"),
            value_input: TextInput::new().with_placeholder("value"),
            mode: Mode::Unfocused,
            max_rows: u16::MAX,
        }
    }

    /// 按显示顺序渲染的条目 "key = value"
    pub fn entries(&self) -> Vec<String> {
        self.order
            .iter()
            .map(|key| format!("{key}{KEY_VALUE_SEPARATOR}{}", self.map[key]))
            .collect()
    }

    pub fn map(&self) -> &BTreeMap<String, String> {
        &self.map
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn key_buffer(&self) -> &str {
        self.key_input.value()
    }

    pub fn value_buffer(&self) -> &str {
        self.value_input.value()
    }

    /// 当前接收字符输入的是否为键输入框
    pub fn editing_key(&self) -> bool {
        self.key_input.is_focused()
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
            Action::Submit => match self.mode {
                Mode::Adding => {
                    self.put_entry();
                    Outcome::Changed
                }
                Mode::Editing => {
                    self.commit_edit();
                    Outcome::Changed
                }
                Mode::Unfocused => Outcome::Ignored,
            },
            Action::SelectPrev | Action::SelectNext => {
                if self.mode != Mode::Editing {
                    return Outcome::Unchanged;
                }
                let index = match action {
                    Action::SelectPrev => self.selected.saturating_sub(1),
                    _ => (self.selected + 1).min(self.order.len() - 1),
                };
                if index == self.selected {
                    return Outcome::Unchanged;
                }
                self.select(index);
                Outcome::Changed
            }
            Action::ToggleBuffer => {
                if self.mode == Mode::Unfocused {
                    return Outcome::Ignored;
                }
                if self.key_input.is_focused() {
                    self.key_input.blur();
                    self.value_input.focus();
                } else {
                    self.key_input.focus();
                    self.value_input.blur();
                }
                Outcome::Changed
            }
            Action::ToggleMode => self.switch_mode(),
            // 两个输入框都收到，只有获得焦点的那个会处理
            _ => self
                .key_input
                .update(action)
                .or(self.value_input.update(action)),
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
        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        render_prompt(frame, chunks[0], &self.prompt, self.mode.label());
        frame.render_widget(Paragraph::new(self.key_input.line()), inputs[0]);
        frame.render_widget(Paragraph::new(self.value_input.line()), inputs[1]);
        let selected = (self.mode == Mode::Editing).then_some(self.selected);
        render_items(frame, chunks[2], &self.entries(), selected);
    }

    pub fn height(&self) -> u16 {
        PROMPT_HEIGHT + 1 + items_height(self.order.len(), self.max_rows)
    }

    pub fn answer(&self) -> Answer {
        let object: Map<String, Value> = self
            .map
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(object)
    }

    pub fn set_bounds(&mut self, width: u16, height: u16) {
        self.key_input.set_width(width / 2);
        self.value_input.set_width(width / 2);
        self.max_rows = height.saturating_sub(5);
    }

    pub fn focus(&mut self) {
        self.key_input.focus();
        self.value_input.blur();
        self.mode = Mode::Adding;
    }

    pub fn blur(&mut self) {
        self.key_input.blur();
        self.value_input.blur();
        self.mode = Mode::Unfocused;
    }

    pub fn is_focused(&self) -> bool {
        self.mode != Mode::Unfocused
    }

    /// 插入或原位更新；只有新键会清空输入框
    fn put_entry(&mut self) {
        let key = self.key_input.value().to_string();
        let value = self.value_input.value().to_string();

        if self.map.insert(key.clone(), value).is_some() {
            tracing::debug!(prompt = %self.prompt, %key, "entry updated in place");
            return;
        }

        tracing::debug!(prompt = %self.prompt, %key, "entry added");
        self.order.push(key);
        self.key_input.reset();
        self.value_input.reset();
    }

    /// 提交对选中条目的修改，条目保持原来的位置
    fn commit_edit(&mut self) {
        let key = self.key_input.value().to_string();
        let value = self.value_input.value().to_string();
        let old_key = self.order[self.selected].clone();

        if key != old_key {
            self.map.remove(&old_key);
            if self.map.contains_key(&key) {
                // 改成了另一个已存在的键：合并到那个条目上
                self.order.remove(self.selected);
                self.selected = self.position(&key);
            } else {
                self.order[self.selected] = key.clone();
            }
        }
        tracing::debug!(prompt = %self.prompt, %key, index = self.selected, "entry edited");
        self.map.insert(key, value);
        self.select(self.selected);
    }

    /// 删除选中条目（显示与映射同时删除）；删空后回到 Adding
    fn remove_selected(&mut self) {
        let key = self.order.remove(self.selected);
        self.map.remove(&key);
        if self.order.is_empty() {
            self.mode = Mode::Adding;
            self.selected = 0;
            self.key_input.reset();
            self.value_input.reset();
        } else {
            self.select(self.selected.min(self.order.len() - 1));
        }
    }

    fn switch_mode(&mut self) -> Outcome {
        match self.mode {
            Mode::Editing => {
                self.mode = Mode::Adding;
                self.key_input.set_value("");
                self.value_input.set_value("");
                Outcome::Changed
            }
            Mode::Adding if !self.order.is_empty() => {
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
        let key = &self.order[index];
        self.key_input.set_value(key.clone());
        self.value_input.set_value(self.map[key].clone());
    }

    fn position(&self, key: &str) -> usize {
        self.order
            .iter()
            .position(|k| k == key)
            .unwrap_or_default()
    }
}

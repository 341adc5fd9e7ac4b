//! 单行编辑缓冲区
//!
//! 被文本、列表、键值问题共用。只有获得焦点时才接受编辑操作。

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use super::Outcome;
use crate::ui::actions::Action;
use crate::ui::view::components::FOCUSED_BORDER_COLOR;

const PROMPT: &str = "> ";

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// 光标位置（字符索引）
    cursor: usize,
    focused: bool,
    width: u16,
    placeholder: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 设置内容，光标移到末尾
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.len();
    }

    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
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

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn update(&mut self, action: &Action) -> Outcome {
        if !self.focused {
            return Outcome::Ignored;
        }

        match action {
            Action::Input(c) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, *c);
                self.cursor += 1;
                Outcome::Changed
            }
            Action::DeleteChar => {
                if self.cursor == 0 {
                    return Outcome::Unchanged;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                Outcome::Changed
            }
            Action::Delete => {
                if self.cursor >= self.len() {
                    return Outcome::Unchanged;
                }
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                Outcome::Changed
            }
            Action::CursorLeft => self.move_cursor(self.cursor.saturating_sub(1)),
            Action::CursorRight => self.move_cursor((self.cursor + 1).min(self.len())),
            Action::CursorHome => self.move_cursor(0),
            Action::CursorEnd => self.move_cursor(self.len()),
            _ => Outcome::Ignored,
        }
    }

    /// 渲染为一行：提示符 + 可见窗口内的文本，焦点下显示光标
    pub fn line(&self) -> Line<'static> {
        let prompt_style = if self.focused {
            Style::default().fg(FOCUSED_BORDER_COLOR)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(PROMPT, prompt_style)];

        if self.value.is_empty() && !self.focused {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ));
            return Line::from(spans);
        }

        let chars: Vec<char> = self.value.chars().collect();
        let visible = self.visible_chars();
        let start = (self.cursor + 1).saturating_sub(visible);
        let end = (start + visible).min(chars.len());

        if !self.focused {
            spans.push(Span::raw(chars[start..end].iter().collect::<String>()));
            return Line::from(spans);
        }

        let before: String = chars[start..self.cursor].iter().collect();
        let under = chars.get(self.cursor).copied().unwrap_or(' ');
        let after: String = chars[(self.cursor + 1).min(end)..end].iter().collect();

        spans.push(Span::raw(before));
        spans.push(Span::styled(
            under.to_string(),
            Style::default().add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::raw(after));
        Line::from(spans)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .char_indices()
            .nth(index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn move_cursor(&mut self, to: usize) -> Outcome {
        if to == self.cursor {
            return Outcome::Unchanged;
        }
        self.cursor = to;
        Outcome::Changed
    }

    /// 宽度未设置时不截断
    fn visible_chars(&self) -> usize {
        if self.width == 0 {
            return usize::MAX / 2;
        }
        (self.width as usize).saturating_sub(PROMPT.len() + 1).max(1)
    }
}

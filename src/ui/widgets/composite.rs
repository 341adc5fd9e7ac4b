//! 组合问题
//!
//! 把若干子问题（可以嵌套组合问题）作为一个逻辑问题呈现。
//! 同一时刻只有一个子问题获得焦点；Shift+↑/↓ 先交给子问题，子问题不处理时才移动焦点。
//! 每次渲染都会重新记录子问题的区域（zone），鼠标点击据此切换焦点。

use std::fmt;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Padding},
};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Answer, Entry, Outcome};
use crate::config::DEFAULT_QUESTION_HEIGHT;
use crate::ui::actions::Action;
use crate::ui::view::components::FOCUSED_BORDER_COLOR;

/// 子问题外框：左右外边距、边框、左右内边距
const FRAME_WIDTH: u16 = 6;
const FRAME_HEIGHT: u16 = 2;

/// 子问题区域的标识：组合问题实例 id + 子问题下标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneId {
    pub owner: Uuid,
    pub index: usize,
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.owner, self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub id: ZoneId,
    pub area: Rect,
}

#[derive(Debug, Clone)]
pub struct CompositeField {
    id: Uuid,
    entries: Vec<Entry>,
    focused: usize,
    /// 第一个被渲染的子问题
    offset: usize,
    min_height: u16,
    question_height: u16,
    /// 最近一次渲染时的子问题区域
    zones: Vec<Zone>,
}

impl CompositeField {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            entries,
            focused: 0,
            offset: 0,
            min_height: DEFAULT_QUESTION_HEIGHT,
            question_height: DEFAULT_QUESTION_HEIGHT,
            zones: Vec::new(),
        }
    }

    pub fn with_min_height(mut self, min_height: u16) -> Self {
        self.min_height = min_height;
        self.question_height = self.question_height.max(min_height);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn update(&mut self, action: &Action) -> Outcome {
        match action {
            Action::FocusPrev | Action::FocusNext => {
                let outcome = self.focused_update(action);
                if outcome.is_consumed() {
                    return outcome;
                }
                self.move_focus(action)
            }
            Action::Click { column, row } => self.click(*column, *row),
            _ => self.focused_update(action),
        }
    }

    /// 计算子问题的区域并记录为 zone，保证获得焦点的子问题可见
    pub fn layout(&mut self, area: Rect) -> &[Zone] {
        self.zones.clear();
        if self.entries.is_empty() || area.height == 0 {
            return &self.zones;
        }

        if self.focused < self.offset {
            self.offset = self.focused;
        }
        while self.offset < self.focused && self.span_height(self.offset, self.focused) > area.height
        {
            self.offset += 1;
        }

        let mut y = area.y;
        let bottom = area.bottom();
        for index in self.offset..self.entries.len() {
            if y >= bottom {
                break;
            }
            let height = self.box_height(index).min(bottom - y);
            let rect = Rect::new(
                area.x.saturating_add(1),
                y,
                area.width.saturating_sub(2),
                height,
            );
            self.zones.push(Zone {
                id: ZoneId {
                    owner: self.id,
                    index,
                },
                area: rect,
            });
            y += height;
        }
        &self.zones
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let zones = self.layout(area).to_vec();
        for zone in zones {
            let index = zone.id.index;
            let border_style = if index == self.focused {
                Style::default().fg(FOCUSED_BORDER_COLOR)
            } else {
                Style::default()
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .padding(Padding::horizontal(1));
            let inner = block.inner(zone.area);
            frame.render_widget(block, zone.area);
            self.entries[index].question.render(frame, inner);
        }
    }

    pub fn height(&self) -> u16 {
        self.span_height(0, self.entries.len().saturating_sub(1))
    }

    /// 以各子问题的键组成答案对象
    pub fn answer(&self) -> Answer {
        let object: Map<String, Value> = self
            .entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.question.answer()))
            .collect();
        Value::Object(object)
    }

    pub fn set_bounds(&mut self, width: u16, height: u16) {
        self.question_height = (height / 3).max(self.min_height);
        let inner_width = width.saturating_sub(FRAME_WIDTH);
        let inner_height = self.question_height.saturating_sub(FRAME_HEIGHT);
        for entry in &mut self.entries {
            entry.question.set_bounds(inner_width, inner_height);
        }
    }

    /// 只让当前下标的子问题获得焦点
    pub fn focus(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.focused) {
            entry.question.focus();
        }
    }

    pub fn blur(&mut self) {
        for entry in &mut self.entries {
            entry.question.blur();
        }
    }

    pub fn is_focused(&self) -> bool {
        self.entries
            .get(self.focused)
            .is_some_and(|entry| entry.question.is_focused())
    }

    fn focused_update(&mut self, action: &Action) -> Outcome {
        match self.entries.get_mut(self.focused) {
            Some(entry) => entry.question.update(action),
            None => Outcome::Ignored,
        }
    }

    /// 上下移动焦点，到达两端时不处理（交给上层）
    fn move_focus(&mut self, action: &Action) -> Outcome {
        let next = match action {
            Action::FocusPrev => self.focused.checked_sub(1),
            Action::FocusNext => Some(self.focused + 1).filter(|&i| i < self.entries.len()),
            _ => None,
        };
        match next {
            Some(index) => {
                self.set_focus(index);
                Outcome::Changed
            }
            None => Outcome::Ignored,
        }
    }

    fn click(&mut self, column: u16, row: u16) -> Outcome {
        let position = Position::new(column, row);
        let Some(index) = self
            .zones
            .iter()
            .find(|zone| zone.area.contains(position))
            .map(|zone| zone.id.index)
        else {
            return Outcome::Ignored;
        };

        let switched = index != self.focused;
        if switched {
            self.set_focus(index);
        }
        // 嵌套的组合问题需要继续定位到自己的子问题
        let outcome = self.focused_update(&Action::Click { column, row });
        if switched {
            Outcome::Changed
        } else {
            outcome.or(Outcome::Unchanged)
        }
    }

    fn set_focus(&mut self, index: usize) {
        self.entries[self.focused].question.blur();
        self.entries[index].question.focus();
        tracing::debug!(
            composite = %self.id,
            from = self.focused,
            to = index,
            key = %self.entries[index].key,
            "composite focus moved"
        );
        self.focused = index;
    }

    fn box_height(&self, index: usize) -> u16 {
        let content = self.entries[index].question.height();
        (content + FRAME_HEIGHT).min(self.question_height.max(FRAME_HEIGHT + 1))
    }

    /// from..=to 之间子问题外框的总高度
    fn span_height(&self, from: usize, to: usize) -> u16 {
        if self.entries.is_empty() {
            return 0;
        }
        (from..=to).map(|i| self.box_height(i)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::view::components::PROMPT_HEIGHT;
    use crate::ui::widgets::{KeyValueField, ListField, Question, SelectField, TextField};
    use proptest::prelude::*;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    fn three_children() -> CompositeField {
        let mut composite = CompositeField::new(vec![
            Entry::new("name", TextField::new("Name", "")),
            Entry::new("branches", ListField::new("Branches")),
            Entry::new("teams", KeyValueField::new("Teams")),
        ]);
        composite.focus();
        composite
    }

    fn focused_flags(composite: &CompositeField) -> Vec<bool> {
        composite
            .entries()
            .iter()
            .map(|entry| entry.question.is_focused())
            .collect()
    }

    fn draw(composite: &mut CompositeField, width: u16, height: u16) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| composite.render(frame, frame.area()))
            .unwrap();
    }

    fn click_zone(composite: &mut CompositeField, index: usize) -> Outcome {
        let zone = composite
            .zones()
            .iter()
            .find(|zone| zone.id.index == index)
            .copied()
            .unwrap();
        composite.update(&Action::Click {
            column: zone.area.x + 1,
            row: zone.area.y + 1,
        })
    }

    #[test]
    fn test_focus_moves_down_and_clamps() {
        let mut composite = three_children();
        assert_eq!(focused_flags(&composite), [true, false, false]);

        assert_eq!(composite.update(&Action::FocusNext), Outcome::Changed);
        assert_eq!(composite.focused_index(), 1);
        assert_eq!(composite.update(&Action::FocusNext), Outcome::Changed);
        assert_eq!(composite.focused_index(), 2);
        assert_eq!(composite.update(&Action::FocusNext), Outcome::Ignored);
        assert_eq!(composite.focused_index(), 2);
        assert_eq!(focused_flags(&composite), [false, false, true]);
    }

    #[test]
    fn test_focus_moves_up_and_clamps() {
        let mut composite = three_children();
        assert_eq!(composite.update(&Action::FocusPrev), Outcome::Ignored);
        assert_eq!(focused_flags(&composite), [true, false, false]);

        composite.update(&Action::FocusNext);
        composite.update(&Action::FocusPrev);
        assert_eq!(focused_flags(&composite), [true, false, false]);
    }

    #[test]
    fn test_keys_go_to_focused_child_only() {
        let mut composite = three_children();
        composite.update(&Action::Input('a'));
        composite.update(&Action::FocusNext);
        composite.update(&Action::Input('b'));
        composite.update(&Action::Submit);

        assert_eq!(
            composite.answer(),
            json!({ "name": "a", "branches": ["b"], "teams": {} })
        );
    }

    #[test]
    fn test_blur_blurs_every_child() {
        let mut composite = three_children();
        composite.update(&Action::FocusNext);
        composite.blur();
        assert_eq!(focused_flags(&composite), [false, false, false]);
        assert!(!composite.is_focused());

        composite.focus();
        assert_eq!(focused_flags(&composite), [false, true, false]);
    }

    #[test]
    fn test_zones_recorded_on_render() {
        let mut composite = three_children();
        draw(&mut composite, 60, 40);

        let zones = composite.zones();
        assert_eq!(zones.len(), 3);
        for (i, zone) in zones.iter().enumerate() {
            assert_eq!(zone.id, ZoneId { owner: composite.id(), index: i });
        }
        assert!(zones[0].area.bottom() <= zones[1].area.y);
        assert_eq!(
            zones[1].id.to_string(),
            format!("{}-1", composite.id())
        );
    }

    #[test]
    fn test_click_moves_focus() {
        let mut composite = three_children();
        draw(&mut composite, 60, 40);

        assert_eq!(click_zone(&mut composite, 2), Outcome::Changed);
        assert_eq!(focused_flags(&composite), [false, false, true]);

        assert_eq!(click_zone(&mut composite, 2), Outcome::Unchanged);
        assert_eq!(composite.focused_index(), 2);
    }

    #[test]
    fn test_click_outside_zones_ignored() {
        let mut composite = three_children();
        draw(&mut composite, 60, 40);

        let outcome = composite.update(&Action::Click { column: 0, row: 0 });
        assert_eq!(outcome, Outcome::Ignored);
        let outcome = composite.update(&Action::Click { column: 30, row: 39 });
        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(composite.focused_index(), 0);
    }

    #[test]
    fn test_focused_child_scrolled_into_view() {
        let mut composite = CompositeField::new(
            (0..6)
                .map(|i| Entry::new(format!("q{i}"), TextField::new(format!("Question {i}"), "")))
                .collect(),
        );
        composite.focus();
        for _ in 0..5 {
            composite.update(&Action::FocusNext);
        }
        draw(&mut composite, 40, 14);

        let zones = composite.zones();
        assert!(zones.iter().any(|zone| zone.id.index == 5));
        assert!(zones.iter().all(|zone| zone.id.index > 0));
    }

    #[test]
    fn test_nested_composite_bubbles_at_edges() {
        let inner = CompositeField::new(vec![
            Entry::new("a", TextField::new("A", "")),
            Entry::new("b", TextField::new("B", "")),
        ]);
        let mut outer = CompositeField::new(vec![
            Entry::new("inner", inner),
            Entry::new("visibility", SelectField::new("Visibility", ["public", "private"])),
        ]);
        outer.focus();

        // 先在内层移动
        assert_eq!(outer.update(&Action::FocusNext), Outcome::Changed);
        assert_eq!(outer.focused_index(), 0);
        // 内层到底后由外层移动
        assert_eq!(outer.update(&Action::FocusNext), Outcome::Changed);
        assert_eq!(outer.focused_index(), 1);
        assert_eq!(
            outer.answer(),
            json!({ "inner": { "a": "", "b": "" }, "visibility": "public" })
        );
    }

    #[test]
    fn test_empty_composite() {
        let mut composite = CompositeField::new(Vec::new());
        composite.focus();
        assert!(!composite.is_focused());
        assert_eq!(composite.update(&Action::FocusNext), Outcome::Ignored);
        assert_eq!(composite.height(), 0);
        assert_eq!(composite.answer(), json!({}));
    }

    #[test]
    fn test_click_retargets_nested_composite() {
        let inner = CompositeField::new(vec![
            Entry::new("a", TextField::new("A", "")),
            Entry::new("b", TextField::new("B", "")),
        ]);
        let mut outer = CompositeField::new(vec![
            Entry::new("inner", inner),
            Entry::new("visibility", SelectField::new("Visibility", ["public", "private"])),
        ])
        .with_min_height(20);
        outer.focus();
        draw(&mut outer, 60, 40);

        assert_eq!(click_zone(&mut outer, 1), Outcome::Changed);
        assert_eq!(outer.focused_index(), 1);

        // 点击内层第二个子问题：外层切回内层，内层再切到被点击的子问题
        let Question::Composite(inner) = &outer.entries()[0].question else {
            panic!("first child is a composite");
        };
        let target = inner.zones()[1];
        assert_eq!(target.id.index, 1);
        let outcome = outer.update(&Action::Click {
            column: target.area.x + 1,
            row: target.area.y + 1,
        });

        assert_eq!(outcome, Outcome::Changed);
        assert_eq!(outer.focused_index(), 0);
        assert!(!outer.entries()[1].question.is_focused());
        let Question::Composite(inner) = &outer.entries()[0].question else {
            panic!("first child is a composite");
        };
        assert_eq!(inner.focused_index(), 1);
        assert_eq!(focused_flags(inner), [false, true]);
    }

    proptest! {
        #[test]
        fn test_click_focuses_exactly_the_clicked_child(
            len in 1usize..=6,
            clicks in prop::collection::vec(0usize..6, 1..12),
        ) {
            let mut composite = CompositeField::new(
                (0..len)
                    .map(|i| Entry::new(format!("q{i}"), TextField::new(format!("Question {i}"), "")))
                    .collect(),
            );
            composite.focus();

            for target in clicks {
                let target = target % len;
                draw(&mut composite, 60, 40);
                let before = composite.focused_index();

                let outcome = click_zone(&mut composite, target);
                let expected = if target == before { Outcome::Unchanged } else { Outcome::Changed };
                prop_assert_eq!(outcome, expected);
                prop_assert_eq!(composite.focused_index(), target);

                let focused = focused_flags(&composite);
                prop_assert_eq!(focused.iter().filter(|f| **f).count(), 1);
                prop_assert!(focused[target]);
            }
        }
    }

    #[test]
    fn test_child_bounds_exclude_frame() {
        let mut composite = CompositeField::new(vec![
            Entry::new("name", TextField::new("Name", "abcdefghijklmnopqrstuvwxyz")),
            Entry::new(
                "options",
                SelectField::new("Options", ["1", "2", "3", "4", "5", "6", "7", "8", "9"]),
            ),
        ]);
        composite.focus();
        composite.set_bounds(20, 30);

        // 子问题高度 10，去掉上下边框后选择题还剩 8 行，其中 1 行留给提示
        assert_eq!(composite.entries()[1].question.height(), PROMPT_HEIGHT + 7);

        // 宽度 20 去掉两侧留白、边框和内边距后为 14，可见 11 格（含光标）
        let mut terminal = Terminal::new(TestBackend::new(20, 30)).unwrap();
        terminal
            .draw(|frame| composite.render(frame, frame.area()))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("> qrstuvwxyz "));
        assert!(!screen.contains("pqrstuvwxyz"));
    }

    #[test]
    fn test_bounds_use_a_third_of_the_height() {
        let mut composite = three_children().with_min_height(4);
        composite.set_bounds(80, 60);
        // 每个子问题最多 20 行
        assert!(composite.height() <= 60);

        let mut composite = three_children();
        composite.set_bounds(80, 12);
        // 不低于最小高度
        assert_eq!(composite.question_height, DEFAULT_QUESTION_HEIGHT);
    }
}

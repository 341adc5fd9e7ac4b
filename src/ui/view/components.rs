//! 通用 UI 组件
//!
//! 面板、提示语、条目列表等各控件共用的渲染片段

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// 选中条目的颜色
pub const SELECTED_COLOR: Color = Color::Indexed(170);
/// 获得焦点的子问题边框颜色
pub const FOCUSED_BORDER_COLOR: Color = Color::Indexed(63);

/// 提示语占用的行数（上下各留一行空白）
pub const PROMPT_HEIGHT: u16 = 3;

/// [组件] 带边框的面板，返回内部区域
pub fn render_panel(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 问题提示语，可附带模式说明
pub fn render_prompt(frame: &mut Frame, area: Rect, prompt: &str, hint: Option<&str>) {
    let mut spans = vec![Span::styled(
        format!("{prompt}:"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(hint) = hint {
        spans.push(Span::styled(
            format!(" ({hint})"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let lines = vec![Line::default(), Line::from(spans), Line::default()];
    frame.render_widget(Paragraph::new(lines), area);
}

/// [组件] 条目列表，选中项以 "> " 标记并着色
pub fn render_items(frame: &mut Frame, area: Rect, items: &[String], selected: Option<usize>) {
    if items.is_empty() {
        let empty = Paragraph::new("    (no items)").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if Some(i) == selected {
                ListItem::new(Line::from(Span::styled(
                    format!("  > {item}"),
                    Style::default().fg(SELECTED_COLOR),
                )))
            } else {
                ListItem::new(format!("    {item}"))
            }
        })
        .collect();

    // ListState 负责滚动，保证选中项可见
    let mut state = ListState::default();
    state.select(selected);
    frame.render_stateful_widget(List::new(list_items), area, &mut state);
}

/// 条目列表需要的行数，空列表占一行提示
pub fn items_height(len: usize, max_rows: u16) -> u16 {
    let len = u16::try_from(len).unwrap_or(u16::MAX).max(1);
    len.min(max_rows.max(1))
}

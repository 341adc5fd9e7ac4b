//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use super::state::App;
use components::render_panel;

/// 标题栏与帮助栏各占的行数
const BAR_HEIGHT: u16 = 3;

const HELP_TEXT: &str = "[Shift+←/→] question  [Shift+↑/↓] field  [Tab] add/edit  [Shift+Tab] key/value  [Del] delete  [Ctrl+S] finish  [Ctrl+C] quit";

/// 终端尺寸扣除标题栏、帮助栏和面板边框后留给问题的区域
pub fn content_size(width: u16, height: u16) -> (u16, u16) {
    (
        width.saturating_sub(2),
        height.saturating_sub(2 * BAR_HEIGHT + 2),
    )
}

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BAR_HEIGHT), // 标题
            Constraint::Min(3),             // 当前问题
            Constraint::Length(BAR_HEIGHT), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_question(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("Repository set questionnaire")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_question(frame: &mut Frame, app: &mut App, area: Rect) {
    let sequence = &mut app.sequence;
    let title = match sequence.current_entry() {
        Some(entry) => format!(" {}/{} · {} ", sequence.current + 1, sequence.len(), entry.key),
        None => " no questions ".to_string(),
    };
    let inner = render_panel(frame, area, &title);

    if let Some(question) = sequence.current_question_mut() {
        question.render(frame, inner);
    }
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{HELP_TEXT}  |  {message}"),
        _ => HELP_TEXT.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::QuestionSequence;
    use crate::ui::widgets::{Entry, SelectField, TextField};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_content_size() {
        assert_eq!(content_size(100, 40), (98, 32));
        assert_eq!(content_size(1, 5), (0, 0));
    }

    #[test]
    fn test_render_current_question() {
        let mut app = App::new(QuestionSequence::new(vec![
            Entry::new("visibility", SelectField::new("Visibility", ["public", "private"])),
            Entry::new("name", TextField::new("Name", "")),
        ]));
        let text = screen(&mut app, 120, 20);
        assert!(text.contains("Repository set questionnaire"));
        assert!(text.contains("1/2 · visibility"));
        assert!(text.contains("> public"));
        assert!(!text.contains("Name:"));
    }

    #[test]
    fn test_render_message() {
        let mut app = App::new(QuestionSequence::new(vec![Entry::new(
            "name",
            TextField::new("Name", ""),
        )]));
        app.message = Some("saved".to_string());
        let text = screen(&mut app, 200, 12);
        assert!(text.contains("|  saved"));
    }

    #[test]
    fn test_render_empty_sequence() {
        let mut app = App::new(QuestionSequence::new(Vec::new()));
        let text = screen(&mut app, 60, 12);
        assert!(text.contains("no questions"));
    }
}

//! 终端事件映射 (Event -> Action)
//!
//! 将按键、鼠标、窗口尺寸事件转换为 Action

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::actions::Action;
use super::state::App;

/// 获取事件对应的 Action，未识别的事件返回 None
pub fn get_action(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_action(key),
        Event::Mouse(mouse) => mouse_action(mouse),
        Event::Resize(width, height) => Some(Action::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn key_action(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('s') if ctrl => Some(Action::Finish),
        KeyCode::Left if shift => Some(Action::PrevQuestion),
        KeyCode::Right if shift => Some(Action::NextQuestion),
        KeyCode::Up if shift => Some(Action::FocusPrev),
        KeyCode::Down if shift => Some(Action::FocusNext),
        KeyCode::Tab if shift => Some(Action::ToggleBuffer),
        KeyCode::BackTab => Some(Action::ToggleBuffer),
        KeyCode::Tab => Some(Action::ToggleMode),
        KeyCode::Up => Some(Action::SelectPrev),
        KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Backspace => Some(Action::DeleteChar),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Char(c) if !ctrl && !alt => Some(Action::Input(c)),
        _ => None,
    }
}

/// 只有左键释放被视为点击
fn mouse_action(mouse: &MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Up(MouseButton::Left) => Some(Action::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// 处理终端事件，返回 true 表示主循环应当结束
pub fn handle_event(app: &mut App, event: &Event) -> bool {
    match get_action(event) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_shift_arrows_navigate() {
        assert_eq!(
            get_action(&key(KeyCode::Right, KeyModifiers::SHIFT)),
            Some(Action::NextQuestion)
        );
        assert_eq!(
            get_action(&key(KeyCode::Left, KeyModifiers::SHIFT)),
            Some(Action::PrevQuestion)
        );
        assert_eq!(
            get_action(&key(KeyCode::Down, KeyModifiers::SHIFT)),
            Some(Action::FocusNext)
        );
        assert_eq!(
            get_action(&key(KeyCode::Up, KeyModifiers::NONE)),
            Some(Action::SelectPrev)
        );
    }

    #[test]
    fn test_tab_variants() {
        assert_eq!(
            get_action(&key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Action::ToggleMode)
        );
        assert_eq!(
            get_action(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::ToggleBuffer)
        );
        assert_eq!(
            get_action(&key(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(Action::ToggleBuffer)
        );
    }

    #[test]
    fn test_characters_and_control_keys() {
        assert_eq!(
            get_action(&key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::Input('x'))
        );
        assert_eq!(
            get_action(&key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Action::Input('X'))
        );
        assert_eq!(
            get_action(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            get_action(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(Action::Finish)
        );
        assert_eq!(get_action(&key(KeyCode::Char('x'), KeyModifiers::ALT)), None);
        assert_eq!(get_action(&key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(get_action(&release), None);
    }

    #[test]
    fn test_mouse_and_resize() {
        assert_eq!(
            get_action(&mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(Action::Click { column: 4, row: 7 })
        );
        assert_eq!(get_action(&mouse(MouseEventKind::Down(MouseButton::Left))), None);
        assert_eq!(get_action(&mouse(MouseEventKind::Up(MouseButton::Right))), None);
        assert_eq!(get_action(&mouse(MouseEventKind::Moved)), None);
        assert_eq!(
            get_action(&Event::Resize(120, 40)),
            Some(Action::Resize {
                width: 120,
                height: 40
            })
        );
    }
}

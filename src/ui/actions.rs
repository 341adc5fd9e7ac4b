//! Action 枚举定义 (Intent)
//!
//! 终端事件转化为明确的语义化 Action，再由问题树逐层消费

/// 用户操作枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Finish, // 确认整个问卷

    // 问题之间的导航
    PrevQuestion, // Shift+←
    NextQuestion, // Shift+→
    FocusPrev,    // Shift+↑，组合问题内切换子问题
    FocusNext,    // Shift+↓

    // 字段内部操作
    SelectPrev,
    SelectNext,
    Submit,       // Enter
    Delete,       // Delete
    ToggleMode,   // Tab：添加/编辑
    ToggleBuffer, // Shift+Tab：键/值输入框

    // 编辑缓冲区
    Input(char),
    DeleteChar, // Backspace
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // 指针与窗口
    Click { column: u16, row: u16 },
    Resize { width: u16, height: u16 },
}

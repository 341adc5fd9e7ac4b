mod config;
mod discovery;
mod error;
mod models;
mod questions;
mod storage;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, config_path, load_config};
use crate::error::Result;
use crate::models::AnswerDocument;
use crate::storage::save_document;
use crate::ui::{Action, App, handle_event, render};

/// 日志写入文件，终端留给 TUI
fn init_logging(config: &Config) -> Result<()> {
    if let Some(dir) = config.log_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// 扫描目录得到候选组织和项目，扫描失败时退回空列表
fn discover(config: &Config) -> (Vec<String>, Vec<String>) {
    let organizations = config
        .organizations_dir
        .as_deref()
        .map(|dir| scan(dir, discovery::find_managed_orgs))
        .unwrap_or_default();

    let projects = config
        .projects_dir
        .as_deref()
        .map(|dir| {
            let sets = scan(dir, discovery::find_repository_set_files);
            discovery::project_names(&sets)
        })
        .unwrap_or_default();

    (organizations, projects)
}

fn scan<T: Default>(dir: &Path, find: impl Fn(&Path) -> Result<T>) -> T {
    find(dir).unwrap_or_else(|err| {
        tracing::warn!(dir = %dir.display(), %err, "directory scan failed");
        T::default()
    })
}

fn main() -> Result<()> {
    let config = load_config(&config_path()?)?;
    init_logging(&config)?;

    let (organizations, projects) = discover(&config);
    tracing::info!(
        organizations = organizations.len(),
        projects = projects.len(),
        "starting questionnaire"
    );

    // 创建应用状态
    let sequence =
        questions::repository_set_questions(&organizations, &projects, config.min_question_height);
    let mut app = App::new(sequence);

    // 设置终端
    let mut terminal = setup_terminal()?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;

    // 保存答案
    let Some(answers) = app.sequence.answers() else {
        println!("Aborted, nothing saved");
        return Ok(());
    };
    for entry in &app.sequence.entries {
        tracing::debug!(key = %entry.key, answer = %entry.question.answer_json()?, "answer");
    }
    let document = AnswerDocument::from_answers(&answers)?;
    save_document(&document, &config.output_path, config.output_format)?;
    tracing::info!(
        repositories = document.repository_set.len(),
        path = %config.output_path.display(),
        "answers saved"
    );
    println!("Answers saved to {}", config.output_path.display());

    Ok(())
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// 进入 raw mode 与备用屏幕；中途失败时撤销已完成的步骤
fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    enter_or_rollback(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
            Terminal::new(CrosstermBackend::new(stdout))
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            let _ = disable_raw_mode();
        },
    )
}

fn enter_or_rollback<T>(
    enter: impl FnOnce() -> io::Result<T>,
    rollback: impl FnOnce(),
) -> Result<T> {
    enter().map_err(|err| {
        rollback();
        err.into()
    })
}

fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    // 首帧之前先按当前终端尺寸布局
    let size = terminal.size()?;
    app.dispatch(Action::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        terminal.draw(|f| render(f, app))?;

        let event = crossterm::event::read()?;
        if handle_event(app, &event) {
            break;
        }
    }
    Ok(())
}

//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和问卷序列的导航

use super::actions::Action;
use super::state::{App, QuestionSequence};
use super::view::content_size;
use super::widgets::Outcome;

impl App {
    /// 核心逻辑分发，返回 true 表示应当结束主循环
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                tracing::info!("questionnaire aborted");
                self.quit = true;
            }

            Action::Finish => {
                self.sequence.finish();
                if self.sequence.is_complete() {
                    self.message = Some("All questions answered".to_string());
                } else if let Some(entry) = self.sequence.current_entry() {
                    self.message = Some(format!("Please review `{}` first", entry.key));
                }
            }

            Action::Resize { width, height } => {
                let (width, height) = content_size(width, height);
                self.sequence.resize(width, height);
            }

            action => {
                if self.sequence.update(&action) == Outcome::Changed {
                    self.message = None;
                }
            }
        }
        self.quit || self.sequence.is_complete()
    }
}

impl QuestionSequence {
    /// 把 Action 交给当前问题；左右切换问题由序列自己处理
    pub fn update(&mut self, action: &Action) -> Outcome {
        match action {
            Action::PrevQuestion => self.step(-1),
            Action::NextQuestion => self.step(1),
            _ => match self.current_question_mut() {
                Some(question) => question.update(action),
                None => Outcome::Ignored,
            },
        }
    }

    /// 窗口尺寸变化广播给所有问题，而不只是当前问题
    pub fn resize(&mut self, width: u16, height: u16) {
        for entry in &mut self.entries {
            entry.question.set_bounds(width, height);
        }
    }

    // ============ 导航相关 ============

    /// 前后移动当前问题，两端不回绕
    fn step(&mut self, delta: isize) -> Outcome {
        if self.entries.is_empty() {
            return Outcome::Ignored;
        }
        let last = self.entries.len() - 1;
        let target = self.current.saturating_add_signed(delta).min(last);
        if target == self.current {
            return Outcome::Unchanged;
        }
        self.go_to(target);
        Outcome::Changed
    }

    /// 切换当前问题：旧问题失去焦点，新问题获得焦点
    pub fn go_to(&mut self, index: usize) {
        self.entries[self.current].question.blur();
        self.entries[index].question.focus();
        self.visited[index] = true;
        tracing::debug!(from = self.current, to = index, key = %self.entries[index].key, "question changed");
        self.current = index;
    }

    // ============ 完成相关 ============

    /// 确认问卷：所有问题都看过才算完成，否则跳到第一个未看过的问题
    pub fn finish(&mut self) {
        match self.visited.iter().position(|visited| !visited) {
            Some(index) => {
                tracing::info!(key = %self.entries[index].key, "questionnaire has unvisited questions");
                self.go_to(index);
            }
            None => {
                tracing::info!(questions = self.entries.len(), "questionnaire complete");
                if let Some(entry) = self.entries.get_mut(self.current) {
                    entry.question.blur();
                }
                self.complete = true;
            }
        }
    }
}

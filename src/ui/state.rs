//! App 状态定义 (Model)
//!
//! 问卷序列及应用状态

use super::widgets::{Answer, Entry, Question};

/// 顶层问题序列：同一时刻只有一个问题获得焦点
#[derive(Debug, Clone)]
pub struct QuestionSequence {
    pub entries: Vec<Entry>,
    pub current: usize,
    pub visited: Vec<bool>,
    pub complete: bool,
}

/// 应用状态
#[derive(Debug, Clone)]
pub struct App {
    pub sequence: QuestionSequence,
    pub message: Option<String>,
    pub quit: bool,
}

impl QuestionSequence {
    /// 创建问题序列，第一个问题获得焦点
    pub fn new(entries: Vec<Entry>) -> Self {
        let mut sequence = Self {
            visited: vec![false; entries.len()],
            entries,
            current: 0,
            complete: false,
        };
        if let Some(entry) = sequence.entries.first_mut() {
            entry.question.focus();
            sequence.visited[0] = true;
        }
        sequence
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 获取当前问题
    pub fn current_entry(&self) -> Option<&Entry> {
        self.entries.get(self.current)
    }

    pub fn current_question_mut(&mut self) -> Option<&mut Question> {
        self.entries
            .get_mut(self.current)
            .map(|entry| &mut entry.question)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// 所有问题的答案，以问题键为键；问卷完成前不可用
    pub fn answers(&self) -> Option<Answer> {
        if !self.complete {
            return None;
        }
        let object = self
            .entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.question.answer()))
            .collect();
        Some(Answer::Object(object))
    }
}

impl App {
    /// 创建新的应用实例
    pub fn new(sequence: QuestionSequence) -> Self {
        Self {
            sequence,
            message: None,
            quit: false,
        }
    }
}

//! 仓库集问卷
//!
//! 问题键与 [`AnswerDocument::from_answers`](crate::models::AnswerDocument::from_answers) 读取的键一一对应

use crate::ui::QuestionSequence;
use crate::ui::widgets::{
    CompositeField, Entry, KeyValueField, ListField, Question, SelectField, TextField,
};

const BOOLEAN_OPTIONS: [&str; 2] = ["true", "false"];

/// 有候选项时给出选择题，否则退化为文本题
fn pick_or_enter(prompt: &str, options: &[String]) -> Question {
    if options.is_empty() {
        TextField::new(prompt, "").into()
    } else {
        SelectField::new(prompt, options.iter().cloned()).into()
    }
}

fn yes_no(prompt: &str) -> SelectField {
    SelectField::new(prompt, BOOLEAN_OPTIONS)
}

/// 生成仓库集问卷
pub fn repository_set_questions(
    organizations: &[String],
    projects: &[String],
    min_height: u16,
) -> QuestionSequence {
    let branches = CompositeField::new(vec![
        Entry::new(
            "default_branch",
            TextField::new("Enter the default branch for the repository", "main"),
        ),
        Entry::new(
            "protected_branches",
            ListField::new("Enter the name(s) of any protected branches"),
        ),
        Entry::new("delete_head_on_merge", yes_no("Delete head branches on merge")),
    ])
    .with_min_height(min_height);

    let permissions = CompositeField::new(vec![
        Entry::new(
            "teams",
            KeyValueField::new("Enter custom team permissions for the repository"),
        ),
        Entry::new(
            "users",
            KeyValueField::new("Enter custom user permissions for the repository"),
        ),
    ])
    .with_min_height(min_height);

    QuestionSequence::new(vec![
        Entry::new(
            "organization",
            pick_or_enter("Select the organization", organizations),
        ),
        Entry::new("project", pick_or_enter("Select the project", projects)),
        Entry::new(
            "visibility",
            SelectField::new("Select the visibility of the repository", ["public", "private"]),
        ),
        Entry::new("name", TextField::new("Enter the name of the repository", "")),
        Entry::new(
            "description",
            TextField::new("Enter the description for the repository", ""),
        ),
        Entry::new("branches", branches),
        Entry::new("permissions", permissions),
        Entry::new("advance_security", yes_no("Enable Github Advance Security")),
        Entry::new("vulnerability_alerts", yes_no("Enable vulnerability alerts")),
        Entry::new("topics", ListField::new("Add Topics")),
        Entry::new(
            "homepage",
            TextField::new("Enter the homepage for the repository", ""),
        ),
        Entry::new(
            "requires_web_commit_signing",
            yes_no("Require web commit signoff"),
        ),
        Entry::new(
            "dependabot_security_updates",
            yes_no("Enable Dependabot security updates"),
        ),
        Entry::new("allow_auto_merge", yes_no("Allow auto merge")),
        Entry::new(
            "license_template",
            TextField::new("Enter the name of a license template", ""),
        ),
    ])
}

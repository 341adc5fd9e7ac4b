use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// 仓库可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// 单个仓库的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RepositoryInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub default_branch: String,
    #[serde(default)]
    pub protected_branches: Vec<String>,
    #[serde(default)]
    pub advance_security: bool,
    #[serde(default)]
    pub has_vulnerability_alerts: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub delete_head_on_merge: bool,
    #[serde(default)]
    pub requires_web_commit_signing: bool,
    #[serde(default)]
    pub dependabot_security_updates: bool,
    #[serde(default)]
    pub allow_auto_merge: bool,
    #[serde(default)]
    pub license_template: String,
    #[serde(default)]
    pub team_permissions: BTreeMap<String, String>,
    #[serde(default)]
    pub user_permissions: BTreeMap<String, String>,
}

/// 仓库集合，按可见性分组并以仓库名为键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RepositorySetInput {
    #[serde(default)]
    pub private_repositories: BTreeMap<String, RepositoryInput>,
    #[serde(default)]
    pub public_repositories: BTreeMap<String, RepositoryInput>,
}

impl RepositorySetInput {
    pub fn insert(&mut self, visibility: Visibility, repository: RepositoryInput) {
        let target = match visibility {
            Visibility::Public => &mut self.public_repositories,
            Visibility::Private => &mut self.private_repositories,
        };
        target.insert(repository.name.clone(), repository);
    }

    pub fn len(&self) -> usize {
        self.private_repositories.len() + self.public_repositories.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub version: String,
    pub generated_at: DateTime<Local>,
}

impl Default for DocumentMeta {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            generated_at: Local::now(),
        }
    }
}

/// 输出文件结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerDocument {
    pub organization: String,
    pub project: String,
    pub meta: DocumentMeta,
    pub repository_set: RepositorySetInput,
}

impl AnswerDocument {
    /// 由问卷答案（以问题键为键的 JSON 对象）构造输出文档
    pub fn from_answers(answers: &Value) -> Result<Self> {
        let answers = AnswerReader::new("answers", answers)?;
        let branches = answers.nested("branches")?;
        let permissions = answers.nested("permissions")?;

        let visibility = match answers.text("visibility")? {
            "public" => Visibility::Public,
            "private" => Visibility::Private,
            other => return Err(Error::Answer(format!("unknown visibility `{other}`"))),
        };

        let repository = RepositoryInput {
            name: answers.text("name")?.to_string(),
            description: answers.text("description")?.to_string(),
            default_branch: branches.text("default_branch")?.to_string(),
            protected_branches: branches.list("protected_branches")?,
            advance_security: answers.flag("advance_security")?,
            has_vulnerability_alerts: answers.flag("vulnerability_alerts")?,
            topics: answers.list("topics")?,
            homepage: answers.text("homepage")?.to_string(),
            delete_head_on_merge: branches.flag("delete_head_on_merge")?,
            requires_web_commit_signing: answers.flag("requires_web_commit_signing")?,
            dependabot_security_updates: answers.flag("dependabot_security_updates")?,
            allow_auto_merge: answers.flag("allow_auto_merge")?,
            license_template: answers.text("license_template")?.to_string(),
            team_permissions: permissions.map("teams")?,
            user_permissions: permissions.map("users")?,
        };

        let mut repository_set = RepositorySetInput::default();
        repository_set.insert(visibility, repository);

        Ok(Self {
            organization: answers.text("organization")?.to_string(),
            project: answers.text("project")?.to_string(),
            meta: DocumentMeta::default(),
            repository_set,
        })
    }
}

/// 按键读取答案对象，类型不符即报错
struct AnswerReader<'a> {
    path: String,
    object: &'a serde_json::Map<String, Value>,
}

impl<'a> AnswerReader<'a> {
    fn new(path: &str, value: &'a Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::Answer(format!("`{path}` is not an object")))?;
        Ok(Self {
            path: path.to_string(),
            object,
        })
    }

    fn get(&self, key: &str) -> Result<&'a Value> {
        self.object
            .get(key)
            .ok_or_else(|| Error::Answer(format!("missing `{}.{key}`", self.path)))
    }

    fn mismatch(&self, key: &str, expected: &str) -> Error {
        Error::Answer(format!("`{}.{key}` is not {expected}", self.path))
    }

    fn nested(&self, key: &str) -> Result<AnswerReader<'a>> {
        AnswerReader::new(&format!("{}.{key}", self.path), self.get(key)?)
    }

    fn text(&self, key: &str) -> Result<&'a str> {
        self.get(key)?
            .as_str()
            .ok_or_else(|| self.mismatch(key, "a string"))
    }

    fn flag(&self, key: &str) -> Result<bool> {
        match self.text(key)? {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(self.mismatch(key, "`true` or `false`")),
        }
    }

    fn list(&self, key: &str) -> Result<Vec<String>> {
        let items = self
            .get(key)?
            .as_array()
            .ok_or_else(|| self.mismatch(key, "a list"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.mismatch(key, "a list of strings"))
            })
            .collect()
    }

    fn map(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let entries = self
            .get(key)?
            .as_object()
            .ok_or_else(|| self.mismatch(key, "a key-value map"))?;
        entries
            .iter()
            .map(|(k, v)| {
                v.as_str()
                    .map(|v| (k.clone(), v.to_string()))
                    .ok_or_else(|| self.mismatch(key, "a map of strings"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_answers() -> Value {
        json!({
            "organization": "acme",
            "project": "platform",
            "visibility": "public",
            "name": "infra",
            "description": "Infrastructure code",
            "branches": {
                "default_branch": "main",
                "protected_branches": ["main", "release"],
                "delete_head_on_merge": "true",
            },
            "permissions": {
                "teams": { "platform": "admin" },
                "users": { "octocat": "push" },
            },
            "advance_security": "false",
            "vulnerability_alerts": "true",
            "topics": ["terraform"],
            "homepage": "",
            "requires_web_commit_signing": "false",
            "dependabot_security_updates": "true",
            "allow_auto_merge": "false",
            "license_template": "mit",
        })
    }

    #[test]
    fn test_from_answers() {
        let doc = AnswerDocument::from_answers(&sample_answers()).unwrap();
        assert_eq!(doc.organization, "acme");
        assert_eq!(doc.project, "platform");
        assert_eq!(doc.repository_set.len(), 1);
        assert!(doc.repository_set.private_repositories.is_empty());

        let repo = &doc.repository_set.public_repositories["infra"];
        assert_eq!(repo.default_branch, "main");
        assert_eq!(repo.protected_branches, vec!["main", "release"]);
        assert!(repo.delete_head_on_merge);
        assert!(!repo.advance_security);
        assert!(repo.has_vulnerability_alerts);
        assert_eq!(repo.team_permissions["platform"], "admin");
        assert_eq!(repo.user_permissions["octocat"], "push");
        assert_eq!(repo.license_template, "mit");
    }

    #[test]
    fn test_private_visibility() {
        let mut answers = sample_answers();
        answers["visibility"] = json!("private");
        let doc = AnswerDocument::from_answers(&answers).unwrap();
        assert!(doc.repository_set.public_repositories.is_empty());
        assert!(doc.repository_set.private_repositories.contains_key("infra"));
    }

    #[test]
    fn test_missing_answer() {
        let mut answers = sample_answers();
        answers["branches"]
            .as_object_mut()
            .unwrap()
            .remove("default_branch");
        let err = AnswerDocument::from_answers(&answers).unwrap_err();
        assert!(err.to_string().contains("answers.branches.default_branch"));
    }

    #[test]
    fn test_wrong_answer_type() {
        let mut answers = sample_answers();
        answers["topics"] = json!("terraform");
        assert!(matches!(
            AnswerDocument::from_answers(&answers),
            Err(Error::Answer(_))
        ));

        let mut answers = sample_answers();
        answers["allow_auto_merge"] = json!("maybe");
        assert!(AnswerDocument::from_answers(&answers).is_err());
    }
}

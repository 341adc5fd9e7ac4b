//! 运行配置
//!
//! 启动时构造一次并显式传递给各协作方，不写入进程环境变量

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const APP_DIR: &str = "reposet";

/// 组合问题中每个子问题的最小高度
pub const DEFAULT_QUESTION_HEIGHT: u16 = 10;

/// 答案输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    pub log_path: PathBuf,
    pub log_level: String,
    /// 已管理组织的目录，每个子目录是一个组织
    pub organizations_dir: Option<PathBuf>,
    /// 项目根目录，按 `<project>/<org>/repositories/terragrunt.hcl` 约定扫描
    pub projects_dir: Option<PathBuf>,
    pub min_question_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            output_path: data_dir.join("repository_set.json"),
            output_format: OutputFormat::Json,
            log_path: data_dir.join("reposet.log"),
            log_level: "info".to_string(),
            organizations_dir: None,
            projects_dir: None,
            min_question_height: DEFAULT_QUESTION_HEIGHT,
        }
    }
}

/// 获取配置文件路径 (~/.config/reposet/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
    Ok(dir.join(APP_DIR).join("config.toml"))
}

/// 从 TOML 文件加载配置，文件不存在时使用默认值
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_question_height, DEFAULT_QUESTION_HEIGHT);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "output_format = \"toml\"\norganizations_dir = \"/srv/orgs\"\nmin_question_height = 6\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.output_format, OutputFormat::Toml);
        assert_eq!(config.organizations_dir, Some(PathBuf::from("/srv/orgs")));
        assert_eq!(config.min_question_height, 6);
        assert_eq!(config.log_level, "info");
        assert!(config.projects_dir.is_none());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_format = \"yaml\"\n").unwrap();

        assert!(matches!(load_config(&path), Err(Error::Config(_))));
    }
}

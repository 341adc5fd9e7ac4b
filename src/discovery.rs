//! 已有配置的发现
//!
//! 只负责文件系统部分：列出组织目录、按命名约定定位仓库集合文件并分组。
//! HCL 内容本身不在这里解析。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const CONFIG_FILE_NAME: &str = "terragrunt.hcl";
const REPOSITORIES_DIR: &str = "repositories";

/// organization -> project -> 仓库集合配置文件
pub type OrgProjectSets = BTreeMap<String, BTreeMap<String, PathBuf>>;

/// 列出已管理的组织（目录下的每个子目录），按名称排序
pub fn find_managed_orgs(dir: &Path) -> Result<Vec<String>> {
    let mut orgs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            orgs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    orgs.sort();
    Ok(orgs)
}

/// 查找 `<project>/<org>/repositories/terragrunt.hcl` 并按组织、项目分组
pub fn find_repository_set_files(root: &Path) -> Result<OrgProjectSets> {
    let mut files = Vec::new();
    collect_config_files(root, &mut files)?;

    let mut sets = OrgProjectSets::new();
    for file in files {
        if let Some((org, project)) = org_and_project(&file) {
            tracing::debug!(%org, %project, file = %file.display(), "found repository set");
            sets.entry(org).or_default().insert(project, file);
        }
    }
    Ok(sets)
}

/// 所有组织下出现过的项目名（去重、排序）
pub fn project_names(sets: &OrgProjectSets) -> Vec<String> {
    let mut names: Vec<String> = sets
        .values()
        .flat_map(|projects| projects.keys().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
}

fn collect_config_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            // 跳过 .terragrunt-cache 等隐藏目录
            if !entry.file_name().to_string_lossy().starts_with('.') {
                collect_config_files(&path, files)?;
            }
        } else if entry.file_name() == CONFIG_FILE_NAME {
            files.push(path);
        }
    }
    Ok(())
}

fn org_and_project(file: &Path) -> Option<(String, String)> {
    let parts: Vec<String> = file
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let n = parts.len();
    if n < 4 || parts[n - 2] != REPOSITORIES_DIR {
        return None;
    }
    Some((parts[n - 3].clone(), parts[n - 4].clone()))
}

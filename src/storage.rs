use std::fs;
use std::path::Path;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::models::AnswerDocument;

/// 将答案文档写入文件，序列化失败时不写入任何内容
pub fn save_document(document: &AnswerDocument, path: &Path, format: OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Toml => toml::to_string_pretty(document)?,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    tracing::info!(path = %path.display(), ?format, "answers saved");
    Ok(())
}

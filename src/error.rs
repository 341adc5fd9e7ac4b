//! 错误类型
//!
//! 控件状态转换本身不会失败，这里只覆盖配置、发现、序列化与终端 I/O

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    /// 答案序列化失败：整个流程中止，不输出部分结果
    #[error("failed to serialize answers: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to serialize answers as TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid answer: {0}")]
    Answer(String),

    #[error("invalid log level: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("cannot determine the user config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;

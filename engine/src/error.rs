use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load resource {}: {reason}", .path.display())]
    ResourceLoad { path: PathBuf, reason: String },

    #[error("platform initialization failed: {0}")]
    Init(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn resource_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        EngineError::ResourceLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

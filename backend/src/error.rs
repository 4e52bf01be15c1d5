use engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("error while building OpenGL window: {0}")]
    Window(String),

    #[error("{stage} shader compilation error: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("program link error: {0}")]
    ShaderLink(String),

    #[error("loading image {} error: {reason}", .path.display())]
    Image { path: PathBuf, reason: String },
}

impl From<String> for BackendError {
    fn from(msg: String) -> Self {
        BackendError::Sdl(msg)
    }
}

impl From<BackendError> for EngineError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Image { path, reason } => EngineError::ResourceLoad { path, reason },
            other => EngineError::Init(other.to_string()),
        }
    }
}

//! Construction parameters of the loop context.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which handler list a key-release event is routed to.
///
/// `PressHandlers` reproduces the historical behaviour where releases fire
/// the key-press handlers and the release list is never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyUpRouting {
    #[default]
    PressHandlers,
    ReleaseHandlers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub caption: String,
    pub width: u32,
    pub height: u32,
    pub background: PathBuf,
    pub frame_rate: u32,
    #[serde(default)]
    pub key_up_routing: KeyUpRouting,
}

impl GameSettings {
    pub fn new(
        caption: impl Into<String>,
        width: u32,
        height: u32,
        background: impl Into<PathBuf>,
        frame_rate: u32,
    ) -> Self {
        Self {
            caption: caption.into(),
            width,
            height,
            background: background.into(),
            frame_rate,
            key_up_routing: KeyUpRouting::default(),
        }
    }

    pub fn with_key_up_routing(mut self, routing: KeyUpRouting) -> Self {
        self.key_up_routing = routing;
        self
    }

    /// Read settings from a TOML file. The result is not validated, so
    /// command-line overrides can still be applied on top.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidSettings(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.frame_rate == 0 {
            return Err(EngineError::InvalidSettings(
                "frame_rate must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

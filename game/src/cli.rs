use clap::Parser;
use engine::{GameSettings, KeyUpRouting};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "game")]
#[command(about = "Fixed-rate 2D game loop demo", long_about = None)]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(long, default_value = "game.toml")]
    pub config: PathBuf,

    /// Window caption
    #[arg(long)]
    pub caption: Option<String>,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Background image drawn at the start of every frame
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Upper bound on frames per second
    #[arg(long)]
    pub frame_rate: Option<u32>,

    /// Route key releases to key-up handlers instead of key-down handlers
    #[arg(long = "fixed-key-up", default_value = "false")]
    pub fixed_key_up: bool,
}

impl Cli {
    /// Settings from the config file with command-line values on top.
    pub fn settings(&self) -> engine::Result<GameSettings> {
        let mut settings = GameSettings::load(&self.config)?;
        self.apply_overrides(&mut settings);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut GameSettings) {
        if let Some(caption) = &self.caption {
            settings.caption = caption.clone();
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(background) = &self.background {
            settings.background = background.clone();
        }
        if let Some(frame_rate) = self.frame_rate {
            settings.frame_rate = frame_rate;
        }
        if self.fixed_key_up {
            settings.key_up_routing = KeyUpRouting::ReleaseHandlers;
        }
    }
}

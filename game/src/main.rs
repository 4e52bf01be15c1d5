mod cli;
mod demo;

use anyhow::Context;
use backend::System;
use clap::Parser;
use cli::Cli;
use engine::Game;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli
        .settings()
        .with_context(|| format!("reading settings from {}", cli.config.display()))?;

    let system = System::open(&settings).context("game initialization failure")?;
    let mut game = Game::new(settings, system)?;
    demo::populate(&mut game);

    game.run();
    Ok(())
}

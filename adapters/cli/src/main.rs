#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Escape experience.

mod config;
mod console;
mod session;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_escape_rendering::{Presentation, RenderingBackend};

use crate::{
    config::{Args, GameConfig},
    console::ConsoleBackend,
    session::Session,
};

/// Entry point for the Maze Escape command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => GameConfig::default(),
    };
    args.apply_to(&mut config);

    let seed = config.maze.seed.unwrap_or_else(rand::random);
    info!(
        "starting {}x{} maze with seed {seed}",
        config.maze.width, config.maze.height
    );

    let mut session = Session::new(&config, seed);
    let presentation = Presentation::new(session.banner(), session.scene());
    let backend = ConsoleBackend::new(io::stdin().lock(), io::stdout());

    backend
        .run(presentation, move |dt, input, scene| {
            session.step(dt, input, scene);
        })
        .context("console session failed")
}

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;

mod constants;
mod deck;
mod engine;
mod fullscreen;
mod input;
mod layout;
mod playback;
mod render;
mod selector;
mod texture;
mod video;

use crate::constants::{FPS, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::deck::Deck;
use crate::engine::HeroEngine;

#[derive(Parser)]
#[command(author, version, about = "Hero slideshow kiosk player", long_about = None)]
struct Cli {
    /// Deck file to play
    #[arg(default_value = "deck.json")]
    deck: PathBuf,

    /// Write a starter deck to the given path and exit
    #[arg(long, value_name = "PATH")]
    write_sample: Option<PathBuf>,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,

    /// Override the deck's autoplay interval
    #[arg(long, value_name = "SECS")]
    interval_secs: Option<f32>,

    /// Snap between slides instead of animating
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(path) = cli.write_sample {
        deck::write_sample(&path)?;
        println!("sample deck written to {}", path.display());
        return Ok(());
    }

    let mut deck = Deck::load(&cli.deck)?;
    if let Some(secs) = cli.interval_secs {
        deck.options.interval_secs = secs;
    }
    if cli.reduced_motion {
        deck.options.reduced_motion = true;
    }
    log::info!("deck '{}' with {} slides", deck.title, deck.slides.len());

    let (mut rl, thread) = raylib::init()
        .size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .title(&deck.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    if cli.fullscreen && !rl.is_window_fullscreen() {
        rl.toggle_fullscreen();
    }

    let mut engine = HeroEngine::new(&mut rl, &thread, deck);

    while !rl.window_should_close() {
        engine.update(&mut rl, &thread);
        let mut d = rl.begin_drawing(&thread);
        engine.draw(&mut d);
    }

    Ok(())
}

use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

mod app;
mod engine;
mod error;
mod tui;

use app::{Slide48, MAX_SIZE, MIN_SIZE};
use engine::game::{Game, GameConfig, DEFAULT_SIZE, DEFAULT_TARGET};
use tui::crossterm::{Crossterm, CrosstermEvents};

/// Slide the tiles, merge equal neighbours, reach the target card.
#[derive(Debug, Parser)]
#[command(name = "slide48", version, about)]
struct Args {
    /// Width and height of the board.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SIZE as u16,
        value_parser = clap::value_parser!(u16).range(MIN_SIZE as i64..=MAX_SIZE as i64),
    )]
    size: u16,

    /// Card value that wins the game.
    #[arg(short, long, default_value_t = DEFAULT_TARGET)]
    target: u32,

    /// Seed the tile spawner for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes; the terminal is taken by the board.
    #[arg(long, default_value = "./slide48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn setup_logging(level: log::LevelFilter, path: &Path) -> error::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose.log_level_filter(), &args.log_file)?;
    log::debug!("{args:?}");

    let rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    };
    let config = GameConfig {
        size: args.size as usize,
        target: args.target,
    };
    let game = Game::new(config, rng)?;

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::default();
    let score = Slide48::new(game, renderer, event_source).run()?;

    println!("final score: {score}");
    Ok(())
}

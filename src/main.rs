//! Headless replay runner (default binary).
//!
//! Starts a session, applies a scripted action string, and prints one JSON
//! observation per step on stdout. Logs go to stderr (`RUST_LOG=debug`).
//!
//! ```text
//! flip-tetris --mode invert --seed 7 --actions "llu h rrh" --pretty
//! ```

use std::io::{self, BufWriter};

use anyhow::Result;
use log::warn;

use flip_tetris::replay::{parse_replay_args, render_ascii, run_replay};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_replay_args(&args)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let engine = run_replay(&config, &mut out)?;

    if engine.game_over() {
        warn!("session ended in game over after {} pieces", engine.pieces_locked());
    }

    if config.pretty {
        for row in render_ascii(&engine) {
            eprintln!("{}", row);
        }
        eprintln!(
            "score {}  lines {}  level {}",
            engine.score(),
            engine.lines(),
            engine.level()
        );
    }

    Ok(())
}

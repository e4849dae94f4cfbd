//! Scripted replay driver
//!
//! Runs one session from a seed and an action script and writes one JSON line
//! per step: the action, whether it changed anything, the events it produced,
//! and the resulting snapshot. Gravity is not simulated; a script advances the
//! piece with explicit `d` (soft drop) and `h` (hard drop) codes.

use std::io::Write;

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;

use crate::core::{parse_mode, Engine, EngineError, EngineEvent, GameSnapshot, PieceSource};
use crate::types::{GameAction, GameMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    pub mode: GameMode,
    pub seed: u32,
    pub actions: Vec<GameAction>,
    /// Print the final board as text to stderr.
    pub pretty: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            seed: 1,
            actions: Vec::new(),
            pretty: false,
        }
    }
}

/// One line of replay output
#[derive(Debug, Serialize)]
pub struct ReplayRecord<'a> {
    pub step: usize,
    /// `None` for the initial state after `start_session`.
    pub action: Option<&'static str>,
    pub applied: bool,
    pub events: &'a [EngineEvent],
    pub ghost_y: Option<i8>,
    pub state: &'a GameSnapshot,
}

pub fn parse_replay_args(args: &[String]) -> Result<ReplayConfig> {
    let mut config = ReplayConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --mode"))?;
                config.mode = parse_mode(v)?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("replay: invalid --seed value: {}", v))?;
            }
            "--actions" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --actions"))?;
                config.actions = parse_script(v)?;
            }
            "--pretty" => {
                config.pretty = true;
            }
            other => {
                return Err(anyhow!("replay: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Parse an action script of single-character codes (`lruhdn`)
///
/// Whitespace and commas are ignored so long scripts can be grouped.
pub fn parse_script(script: &str) -> Result<Vec<GameAction>, EngineError> {
    script
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| GameAction::from_code(c).ok_or_else(|| EngineError::UnknownAction(c.to_string())))
        .collect()
}

/// Run a session from `config` with uniform random pieces
pub fn run_replay<W: Write>(config: &ReplayConfig, out: &mut W) -> Result<Engine> {
    let mut engine = Engine::new(config.seed);
    run_with_engine(&mut engine, config, out)?;
    Ok(engine)
}

/// Run `config`'s mode and script on an existing engine (any piece source)
///
/// Returns the number of lines written.
pub fn run_with_engine<S: PieceSource, W: Write>(
    engine: &mut Engine<S>,
    config: &ReplayConfig,
    out: &mut W,
) -> Result<usize> {
    engine.start_session(config.mode);
    info!(
        "replay: mode={} seed={} actions={}",
        config.mode.as_str(),
        config.seed,
        config.actions.len()
    );

    let mut snapshot = GameSnapshot::default();
    let mut written = 0usize;

    let events = engine.take_events();
    engine.snapshot_into(&mut snapshot);
    write_record(
        out,
        &ReplayRecord {
            step: 0,
            action: None,
            applied: false,
            events: &events,
            ghost_y: engine.ghost_y(),
            state: &snapshot,
        },
    )?;
    written += 1;

    for (i, &action) in config.actions.iter().enumerate() {
        let applied = engine.apply_action(action);
        let events = engine.take_events();
        engine.snapshot_into(&mut snapshot);
        debug!(
            "step {}: {} applied={} events={}",
            i + 1,
            action.as_str(),
            applied,
            events.len()
        );

        write_record(
            out,
            &ReplayRecord {
                step: i + 1,
                action: Some(action.as_str()),
                applied,
                events: &events,
                ghost_y: engine.ghost_y(),
                state: &snapshot,
            },
        )?;
        written += 1;
    }

    out.flush()?;
    info!(
        "replay finished: score={} lines={} level={} game_over={}",
        engine.score(),
        engine.lines(),
        engine.level(),
        engine.game_over()
    );
    Ok(written)
}

fn write_record<W: Write>(out: &mut W, record: &ReplayRecord<'_>) -> Result<()> {
    let line = serde_json::to_string(record)?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Render the grid as text rows with the active piece drawn as `@`
pub fn render_ascii<S: PieceSource>(engine: &Engine<S>) -> Vec<String> {
    let mut rows: Vec<Vec<char>> = engine
        .board()
        .to_ascii()
        .into_iter()
        .map(|row| row.chars().collect())
        .collect();

    if let Some(active) = engine.active() {
        for (x, y) in active.cells() {
            if x < 0 || y < 0 {
                continue;
            }
            if let Some(cell) = rows.get_mut(y as usize).and_then(|r| r.get_mut(x as usize)) {
                *cell = '@';
            }
        }
    }

    rows.into_iter().map(|r| r.into_iter().collect()).collect()
}

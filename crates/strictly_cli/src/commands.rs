//! Subcommand implementations.
//!
//! Each command returns the text to print so it can be tested without
//! capturing stdout.

use crate::cli::Command;
use crate::config::EngineConfig;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use strictly_boardgames::{AnyGame, GameId};
use strictly_engine::{GameStatus, MoveOptions};
use tracing::{debug, info, instrument};

/// Runs one subcommand against `config`.
#[instrument(skip(config))]
pub fn run(command: &Command, config: &EngineConfig) -> Result<String> {
    match command {
        Command::List => Ok(list()),
        Command::New {
            game,
            out,
            players,
            variants,
            seed,
        } => new_game(config, game, out, *players, variants, *seed),
        Command::Moves { state, player } => moves(state, *player),
        Command::Validate { state, mv } => validate(state, mv),
        Command::Play { state, mv, dry_run } => play(state, mv, *dry_run),
        Command::Render { state, at, json } => render(state, *at, *json),
    }
}

/// One block per bundled game.
pub fn list() -> String {
    let mut out = String::new();
    for id in GameId::all() {
        let info = id.info();
        let _ = writeln!(
            out,
            "{} - {} ({}-{} players)",
            info.uid, info.name, info.min_players, info.max_players
        );
        for flag in info.flags {
            let _ = writeln!(out, "  [{flag}]");
        }
        for variant in info.variants {
            let group = variant.group.map(|g| format!(" ({g})")).unwrap_or_default();
            let _ = writeln!(out, "  {}{}: {}", variant.uid, group, variant.description);
        }
    }
    out
}

/// Reads a state file.
#[instrument(fields(path = %path.display()))]
pub fn read_game(path: &Path) -> Result<AnyGame> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let game = AnyGame::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))?;
    debug!(game = %game.id(), ply = game.ply(), "State loaded");
    Ok(game)
}

/// Writes a state file.
#[instrument(skip(game), fields(path = %path.display()))]
pub fn write_game(path: &Path, game: &AnyGame) -> Result<()> {
    let json = game.state_json()?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("State saved");
    Ok(())
}

/// Board and status as shown after every command that changes the game.
fn summary(game: &AnyGame) -> String {
    let mut out = game.render().to_text();
    match game.status() {
        GameStatus::InProgress => {
            let _ = writeln!(out, "{} to move (ply {})", player_name(game.currplayer()), game.ply());
        }
        GameStatus::Complete => {
            let winners: Vec<String> = game.winner().into_iter().map(player_name).collect();
            let _ = writeln!(out, "Game over. Winner(s): {}", winners.join(", "));
        }
    }
    if let Some(scores) = game.scores() {
        let scores: Vec<String> = scores.iter().map(usize::to_string).collect();
        let _ = writeln!(out, "Scores: {}", scores.join(" / "));
    }
    out
}

fn player_name(player: usize) -> String {
    format!("player {player}")
}

fn new_game(
    config: &EngineConfig,
    uid: &str,
    out: &Path,
    players: Option<usize>,
    variants: &[String],
    seed: Option<u64>,
) -> Result<String> {
    let id = GameId::parse(uid)?;
    let defaults = config.game(uid);
    let players = players
        .or(*defaults.players())
        .unwrap_or(id.info().min_players);
    let variants = if variants.is_empty() {
        defaults.variants().clone()
    } else {
        variants.to_vec()
    };
    let seed = seed.or(*config.seed());

    let game = AnyGame::create(id, players, &variants, seed)?;
    write_game(out, &game)?;
    info!(game = %id, path = %out.display(), "New game written");
    Ok(summary(&game))
}

fn moves(state: &Path, player: Option<usize>) -> Result<String> {
    let game = read_game(state)?;
    let moves = match player {
        Some(p) => game.moves_for(p),
        None => game.moves(),
    };
    Ok(moves.join(" "))
}

fn validate(state: &Path, mv: &str) -> Result<String> {
    let game = read_game(state)?;
    let result = game.validate_move(mv);
    Ok(format!(
        "valid: {}\ncomplete: {:?}\nmessage: {}",
        result.valid(),
        result.complete(),
        result.message()
    ))
}

fn play(state: &Path, mv: &str, dry_run: bool) -> Result<String> {
    let mut game = read_game(state)?;
    if dry_run {
        // The dry run must still reject what a real move would.
        let validation = game.validate_move(mv);
        if !validation.is_submittable() {
            anyhow::bail!("Move rejected: {}", validation.message());
        }
        let future = game.simulate(mv)?;
        return Ok(summary(&future));
    }
    game.move_(mv, MoveOptions::default())?;
    write_game(state, &game)?;
    Ok(summary(&game))
}

fn render(state: &Path, at: Option<isize>, json: bool) -> Result<String> {
    let mut game = read_game(state)?;
    if let Some(index) = at {
        game.load(index)?;
    }
    if json {
        Ok(serde_json::to_string_pretty(&game.render())?)
    } else {
        Ok(game.render().to_text())
    }
}

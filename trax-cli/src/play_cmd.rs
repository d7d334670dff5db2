//! Play command - self-play between a white and a red solver
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_series(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use trax_core::{create_rng, find_wins, Color, GameResult, Move, Solver, SolverConfig, TraxError, Win};

use crate::record::{default_log_path, numbered_path, MoveLog};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Maximum moves per game (both players)
    #[arg(long, default_value = "400")]
    pub max_turns: u32,

    /// Move log file (default: record_<timestamp>.trx for a single game)
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Do not write a move log
    #[arg(long, conflicts_with = "record")]
    pub no_record: bool,

    /// Print the final board of every game
    #[arg(long)]
    pub show_board: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    wins: Vec<Win>,
    moves: Vec<Move>,
    tiles: usize,
}

/// Aggregated results
#[derive(Clone, Debug)]
struct SeriesResults {
    games: Vec<GameRecord>,
    white_wins: usize,
    red_wins: usize,
    unfinished: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Play the series (each game logged to its own file)
/// 2. Report results
pub fn run(args: PlayArgs, config: SolverConfig) -> Result<()> {
    tracing::info!(
        "Starting self-play: {} game(s), strategy={:?}, max {} moves",
        args.games,
        config.strategy,
        args.max_turns
    );

    let results = play_series(&args, &config)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games
fn play_series(args: &PlayArgs, config: &SolverConfig) -> Result<SeriesResults> {
    let mut rng = create_rng(config.seed);
    let mut games = Vec::with_capacity(args.games);

    let progress = if args.games > 1 && !args.json {
        let bar = ProgressBar::new(args.games as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
                .context("Invalid progress template")?,
        );
        Some(bar)
    } else {
        None
    };

    for game_num in 1..=args.games {
        let record = play_single_game(game_num, args, config, &mut rng)?;

        tracing::info!(
            "Game {}: {:?} after {} moves",
            record.game_number,
            record.result,
            record.moves.len()
        );
        if let Some(bar) = &progress {
            bar.inc(1);
        }

        games.push(record);
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(compute_statistics(games))
}

/// Report results
fn report_results(results: &SeriesResults, args: &PlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game, white first, until a win or the move limit
fn play_single_game(
    game_number: usize,
    args: &PlayArgs,
    config: &SolverConfig,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let mut white = Solver::new(Color::White, config.clone().with_seed(rng.gen()));
    let mut red = Solver::new(Color::Red, config.clone().with_seed(rng.gen()));

    let mut log = match log_path(args, game_number) {
        Some(path) => Some(MoveLog::create(&path)?),
        None => None,
    };

    let mut moves: Vec<Move> = Vec::new();
    let mut result = GameResult::Ongoing;
    let mut wins = Vec::new();

    for turn in 0..args.max_turns {
        let mover = if turn % 2 == 0 { &mut white } else { &mut red };

        let mv = match mover.take_turn(turn, moves.last().copied()) {
            Ok(mv) => mv,
            Err(TraxError::NoLegalMove) => {
                tracing::warn!("Game {}: {} has no legal move", game_number, mover.color);
                break;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Game {} turn {}", game_number, turn));
            }
        };

        if let Some(log) = log.as_mut() {
            log.append(mv)?;
        }
        moves.push(mv);

        wins = find_wins(mover.board());
        result = GameResult::from_wins(&wins, mover.color);
        if result.is_over() {
            break;
        }
    }

    let board = if moves.len() % 2 == 1 { white.board() } else { red.board() };
    if args.show_board && !args.json {
        println!("Game {} final board:\n{}", game_number, board);
    }

    Ok(GameRecord {
        game_number,
        result,
        wins,
        tiles: board.len(),
        moves,
    })
}

/// Compute aggregate statistics from game records
fn compute_statistics(games: Vec<GameRecord>) -> SeriesResults {
    let count = |r: GameResult| games.iter().filter(|g| g.result == r).count();
    let white_wins = count(GameResult::WhiteWins);
    let red_wins = count(GameResult::RedWins);
    let unfinished = count(GameResult::Ongoing);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    SeriesResults {
        games,
        white_wins,
        red_wins,
        unfinished,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn log_path(args: &PlayArgs, game_number: usize) -> Option<PathBuf> {
    if args.no_record {
        return None;
    }
    match &args.record {
        Some(base) => Some(numbered_path(base, game_number, args.games)),
        None if args.games == 1 => Some(default_log_path()),
        None => None,
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SeriesResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: GameResult,
        wins: Vec<Win>,
        tiles: usize,
        moves: Vec<Move>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        white_wins: usize,
        red_wins: usize,
        unfinished: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        white_wins: results.white_wins,
        red_wins: results.red_wins,
        unfinished: results.unfinished,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                wins: g.wins.clone(),
                tiles: g.tiles,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &SeriesResults) {
    let total = results.games.len();

    println!("\n=== Self-play Results ===");
    println!("Total games: {}", total);
    println!("White wins:  {} ({:.1}%)", results.white_wins, percent(results.white_wins, total));
    println!("Red wins:    {} ({:.1}%)", results.red_wins, percent(results.red_wins, total));
    println!("Unfinished:  {} ({:.1}%)", results.unfinished, percent(results.unfinished, total));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        let how: Vec<String> = game.wins.iter().map(|w| format!("{} {:?}", w.color, w.kind)).collect();
        println!(
            "  Game {}: {:?} in {} moves, {} tiles [{}]",
            game.game_number,
            game.result,
            game.moves.len(),
            game.tiles,
            how.join(", ")
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

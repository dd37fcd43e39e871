//! Self-play command - the greedy AI against itself
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), play_games(), report_results()
//! - Level 3: play_single_game(), compute_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use surakarta_core::{Action, AiConfig, Board, GameStatus, GreedyAI, PieceColor, Player, RandomAI};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Kind of player seated at one color
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    /// One-ply greedy evaluator
    Greedy,
    /// Captures when it can, otherwise moves at random
    Random,
}

#[derive(Args)]
pub struct SelfPlayArgs {
    /// Player for red
    #[arg(long, value_enum, default_value = "greedy")]
    pub red: PlayerKind,

    /// Player for black
    #[arg(long, value_enum, default_value = "greedy")]
    pub black: PlayerKind,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Stop a game after this many actions and count it as a draw
    #[arg(long, default_value = "200")]
    pub max_plies: usize,

    /// Break ties between equal scores at random
    #[arg(long)]
    pub random_ties: bool,

    /// AI configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Play games on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
pub(crate) struct GameRecord {
    pub game_number: usize,
    pub result: GameStatus,
    pub plies: usize,
    pub moves: Vec<Action>,
}

/// Aggregated results
#[derive(Clone, Debug)]
pub(crate) struct SelfPlayResults {
    pub games: Vec<GameRecord>,
    pub red_wins: usize,
    pub black_wins: usize,
    pub draws: usize,
    pub avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run self-play command
pub fn run(args: SelfPlayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args)?;

    tracing::info!(
        "Starting self-play: {:?} vs {:?}, {} games, max {} plies, random ties={}",
        args.red,
        args.black,
        args.games,
        args.max_plies,
        config.random_tie_break
    );

    let results = play_games(&config, &args, seed);

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_config(args: &SelfPlayArgs) -> Result<AiConfig> {
    let mut config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::default(),
    };
    if args.random_ties {
        config.random_tie_break = true;
    }
    Ok(config)
}

/// Play all games, one seed per game so results do not depend on scheduling
pub(crate) fn play_games(
    config: &AiConfig,
    args: &SelfPlayArgs,
    seed: Option<u64>,
) -> SelfPlayResults {
    let mut rng = create_rng(seed.or(config.seed));
    let seeds: Vec<u64> = (0..args.games).map(|_| rng.gen()).collect();

    let play = |(index, &game_seed): (usize, &u64)| {
        let lineup = (args.red, args.black);
        let record = play_single_game(index + 1, config, lineup, args.max_plies, game_seed);
        tracing::info!(
            "Game {}: {:?} ({} plies)",
            record.game_number,
            record.result,
            record.plies
        );
        record
    };

    let games: Vec<GameRecord> = if args.parallel {
        seeds.par_iter().enumerate().map(play).collect()
    } else {
        seeds.iter().enumerate().map(play).collect()
    };

    compute_statistics(games)
}

fn report_results(results: &SelfPlayResults, args: &SelfPlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game from the initial formation, `lineup` being (red, black)
pub(crate) fn play_single_game(
    game_number: usize,
    config: &AiConfig,
    lineup: (PlayerKind, PlayerKind),
    max_plies: usize,
    seed: u64,
) -> GameRecord {
    let mut board = Board::started();
    let mut red = create_player(lineup.0, PieceColor::Red, config, seed);
    let mut black = create_player(lineup.1, PieceColor::Black, config, seed.wrapping_add(1));
    let mut moves = Vec::new();

    while !board.is_over() && moves.len() < max_plies {
        let ai = match board.side_to_move() {
            Some(PieceColor::Red) => &mut red,
            Some(_) => &mut black,
            None => break,
        };
        match ai.next_step(&mut board) {
            Some(action) => moves.push(action),
            None => {
                tracing::debug!("Game {}: {} has no legal action", game_number, ai.color());
                break;
            }
        }
    }

    GameRecord {
        game_number,
        result: board.status(),
        plies: moves.len(),
        moves,
    }
}

pub(crate) fn compute_statistics(games: Vec<GameRecord>) -> SelfPlayResults {
    let red_wins = games
        .iter()
        .filter(|g| g.result == GameStatus::RedWon)
        .count();
    let black_wins = games
        .iter()
        .filter(|g| g.result == GameStatus::BlackWon)
        .count();
    let draws = games.len() - red_wins - black_wins;

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    SelfPlayResults {
        games,
        red_wins,
        black_wins,
        draws,
        avg_plies,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_player(
    kind: PlayerKind,
    color: PieceColor,
    config: &AiConfig,
    seed: u64,
) -> Box<dyn Player> {
    match kind {
        PlayerKind::Greedy => {
            Box::new(GreedyAI::with_config(color, config.clone().with_seed(seed)))
        }
        PlayerKind::Random => Box::new(RandomAI::with_seed(color, seed)),
    }
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SelfPlayResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: GameStatus,
        plies: usize,
        moves: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        black_wins: usize,
        draws: usize,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        black_wins: results.black_wins,
        draws: results.draws,
        avg_plies: results.avg_plies,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: g.result,
                plies: g.plies,
                moves: g.moves.iter().map(ToString::to_string).collect(),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &SelfPlayResults) {
    let total = results.games.len();

    println!("\n=== Self-play Results ===");
    println!("Total games: {}", total);
    println!(
        "Red wins:    {} ({:.1}%)",
        results.red_wins,
        percent(results.red_wins, total)
    );
    println!(
        "Black wins:  {} ({:.1}%)",
        results.black_wins,
        percent(results.black_wins, total)
    );
    println!(
        "Draws:       {} ({:.1}%)",
        results.draws,
        percent(results.draws, total)
    );
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} after {} plies",
            game.game_number, game.result, game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

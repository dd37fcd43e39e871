//! Integration tests for the Surakarta engine
//!
//! Tests the full stack: board rules, arc captures, the greedy AI and the CLI binary

use std::process::Command;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use surakarta_core::{
    legal_actions, legal_captures, resolve_capture_path, Action, Board, Direction, GameStatus,
    GreedyAI, PieceColor, Player, Position, RandomAI, CARDINALS,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn pos(x: i8, y: i8) -> Position {
    Position::new(x, y)
}

/// Status must agree with the piece counts
fn assert_status_consistent(board: &Board) {
    let red = board.count(PieceColor::Red);
    let black = board.count(PieceColor::Black);
    assert_eq!(red == 0, board.status() == GameStatus::BlackWon, "{board}");
    assert_eq!(black == 0, board.status() == GameStatus::RedWon, "{board}");
}

/// Every capture target is an enemy piece away from the corners
fn assert_captures_sound(board: &Board) {
    let Some(side) = board.side_to_move() else {
        return;
    };
    for origin in board.pieces(side).collect::<Vec<_>>() {
        for target in legal_captures(board, origin, side) {
            assert!(!target.is_corner(), "corner target {target} from {origin}");
            assert_eq!(board.piece_at(target), Some(side.opponent()));
        }
    }
}

fn random_position(rng: &mut ChaCha8Rng) -> Position {
    pos(rng.gen_range(-1..7), rng.gen_range(-1..7))
}

// ============================================================================
// GAME LOGIC TESTS
// ============================================================================

#[test]
fn test_fresh_game() {
    let mut board = Board::new();
    board.new_game();
    assert_eq!(board.status(), GameStatus::RedToMove);
    assert_eq!(board.piece_at(pos(0, 0)), Some(PieceColor::Black));
    assert_eq!(board.piece_at(pos(0, 5)), Some(PieceColor::Red));
    assert_eq!(board.piece_at(pos(2, 2)), Some(PieceColor::Empty));
    assert!(legal_captures(&board, pos(0, 2), PieceColor::Red).is_empty());
}

#[test]
fn test_random_games_keep_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..20 {
        let board_start = Board::started();
        let mut board = board_start;

        for _ in 0..150 {
            assert_status_consistent(&board);
            assert_captures_sound(&board);

            let actions = legal_actions(&board);
            let Some(&action) = actions.choose(&mut rng) else {
                break;
            };

            // A random junk action first: either rejected cleanly or it happened to be legal
            let side = board.side_to_move().unwrap();
            let junk = if rng.gen_bool(0.5) {
                Action::Capture {
                    color: side,
                    origin: random_position(&mut rng),
                    target: random_position(&mut rng),
                }
            } else {
                Action::Move {
                    color: side,
                    origin: random_position(&mut rng),
                    direction: *CARDINALS.choose(&mut rng).unwrap(),
                }
            };
            let before = board;
            let mut scratch = board;
            if !scratch.apply_action(&junk) {
                assert_eq!(scratch, before, "rejected {junk} changed the board");
            }

            assert!(board.apply_action(&action), "generated {action} was rejected");
            assert_ne!(board, before);
            if board.is_over() {
                assert_status_consistent(&board);
                break;
            }
        }
    }
}

#[test]
fn test_adjacent_enemies_only_the_long_way_round() {
    let board = Board::from_layout(
        ["------", "------", "---RB-", "---B--", "------", "------"],
        GameStatus::RedToMove,
    )
    .unwrap();
    let red = pos(3, 2);
    // Straight at them there is no arc in between
    for dir in [Direction::RIGHT, Direction::DOWN] {
        assert_eq!(resolve_capture_path(&board, red, dir, PieceColor::Red, 0), None);
    }
    // Up and round the top-right arc reaches (4, 2); left and round two arcs reaches (3, 3)
    assert_eq!(
        resolve_capture_path(&board, red, Direction::UP, PieceColor::Red, 0),
        Some(pos(4, 2))
    );
    assert_eq!(
        resolve_capture_path(&board, red, Direction::LEFT, PieceColor::Red, 0),
        Some(pos(3, 3))
    );
    let captures = legal_captures(&board, red, PieceColor::Red);
    assert_eq!(captures.len(), 2);
}

#[test]
fn test_scenario_opposite_edges() {
    let mut board = Board::from_layout(
        ["------", "------", "B----R", "------", "------", "------"],
        GameStatus::RedToMove,
    )
    .unwrap();
    let captures = legal_captures(&board, pos(5, 2), PieceColor::Red);
    assert_eq!(captures.into_iter().collect::<Vec<_>>(), vec![pos(0, 2)]);

    // Capturing the last piece wins at once
    assert!(board.apply_capture(pos(5, 2), pos(0, 2), PieceColor::Red));
    assert_eq!(board.status(), GameStatus::RedWon);
    assert_status_consistent(&board);
}

#[test]
fn test_black_wins_by_capture() {
    let mut board = Board::from_layout(
        ["------", "-B----", "------", "------", "----R-", "------"],
        GameStatus::BlackToMove,
    )
    .unwrap();
    // Down column 1, round the bottom-left arc, along row 4
    assert!(board.apply_capture(pos(1, 1), pos(4, 4), PieceColor::Black));
    assert_eq!(board.status(), GameStatus::BlackWon);
}

// ============================================================================
// GREEDY AI TESTS
// ============================================================================

#[test]
fn test_ai_prefers_capture_over_quiet_moves() {
    let board = Board::from_layout(
        ["------", "------", "B-B--R", "------", "------", "------"],
        GameStatus::RedToMove,
    )
    .unwrap();
    let mut ai = GreedyAI::new(PieceColor::Red);
    let action = ai.choose(&board).unwrap();
    assert!(action.is_capture(), "expected a capture, got {action}");
}

#[test]
fn test_ai_game_terminates_consistently() {
    let mut board = Board::started();
    let mut red = GreedyAI::new(PieceColor::Red);
    let mut black = GreedyAI::new(PieceColor::Black);

    for _ in 0..300 {
        let ai = match board.side_to_move() {
            Some(PieceColor::Red) => &mut red,
            Some(_) => &mut black,
            None => break,
        };
        let before = board;
        if ai.next_step(&mut board).is_none() {
            assert_eq!(board, before);
            break;
        }
        assert_ne!(board, before);
        assert_status_consistent(&board);
    }
}

#[test]
fn test_greedy_against_random_player() {
    let mut board = Board::started();
    let mut red = GreedyAI::new(PieceColor::Red);
    let mut black = RandomAI::with_seed(PieceColor::Black, 77);

    for _ in 0..400 {
        let player: &mut dyn Player = match board.side_to_move() {
            Some(PieceColor::Red) => &mut red,
            Some(_) => &mut black,
            None => break,
        };
        let before = board;
        if player.next_step(&mut board).is_none() {
            assert_eq!(board, before);
            break;
        }
        assert_status_consistent(&board);
        assert_captures_sound(&board);
    }
}

#[test]
fn test_ai_output_parses_back() {
    let mut board = Board::started();
    assert!(board.apply_move(pos(3, 4), Direction::UP_LEFT, PieceColor::Red));
    let mut ai = GreedyAI::new(PieceColor::Black);
    let action = ai.choose(&board).unwrap();
    let parsed = Action::parse(&action.to_string(), PieceColor::Black).unwrap();
    assert_eq!(parsed, action);
}

// ============================================================================
// CLI TESTS
// ============================================================================

#[test]
fn test_selfplay_json() {
    let output = Command::new(env!("CARGO_BIN_EXE_surakarta"))
        .args([
            "selfplay",
            "--games",
            "2",
            "--max-plies",
            "20",
            "--random-ties",
            "--seed",
            "5",
            "--json",
        ])
        .output()
        .expect("run surakarta binary");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_games"], 2);
    let games = json["games"].as_array().unwrap();
    assert_eq!(games.len(), 2);
    for game in games {
        let moves = game["moves"].as_array().unwrap();
        assert!(moves.len() <= 20);
        assert_eq!(game["plies"].as_u64().unwrap() as usize, moves.len());
        let first = moves[0].as_str().unwrap();
        assert!(Action::parse(first, PieceColor::Red).is_ok());
    }
}

#[test]
fn test_selfplay_mixed_lineup_text() {
    let output = Command::new(env!("CARGO_BIN_EXE_surakarta"))
        .args([
            "selfplay", "--red", "greedy", "--black", "random", "--games", "2", "--seed", "3",
        ])
        .output()
        .expect("run surakarta binary");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("=== Self-play Results ==="));
    assert!(text.contains("Total games: 2"));
}

#[test]
fn test_play_quits_on_command() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_surakarta"))
        .args(["play"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("run surakarta binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"m 0 4 u\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("status: black's turn"));
    assert!(text.contains("status: red's turn"));
}

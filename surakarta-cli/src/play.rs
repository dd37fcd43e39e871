//! Play command - a human against the greedy AI
//!
//! The human types actions in notation on stdin. With `--handoff FILE` the
//! human's action is read from FILE each time a line arrives on stdin, and the
//! AI's reply is written back to FILE, so another program can drive the game.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use surakarta_core::{Action, AiConfig, Board, GreedyAI, PieceColor, Player, Position};

/// Side played by the AI
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Red,
    Black,
}

impl From<Side> for PieceColor {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => PieceColor::Red,
            Side::Black => PieceColor::Black,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Color played by the AI
    #[arg(long, value_enum, default_value = "black")]
    pub ai_color: Side,

    /// Exchange actions through this file instead of typing them
    #[arg(long, value_name = "FILE")]
    pub handoff: Option<PathBuf>,

    /// AI configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Break ties between equal scores at random (seeded by the global --seed)
    #[arg(long)]
    pub random_ties: bool,
}

/// What the loop should do after a human command
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Reply {
    Continue(Option<String>),
    Quit,
}

/// One interactive game
pub(crate) struct Session {
    pub board: Board,
    ai: GreedyAI,
    human: PieceColor,
    handoff: Option<PathBuf>,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = load_config(&args, seed)?;
    if seed.is_some() && !config.random_tie_break {
        tracing::warn!("--seed has no effect on play without --random-ties");
    }

    let mut session = Session::new(args.ai_color.into(), config, args.handoff);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    session.run(&mut stdin.lock(), &mut stdout)
}

/// AI settings from the config file, then the command-line overrides
fn load_config(args: &PlayArgs, seed: Option<u64>) -> Result<AiConfig> {
    let mut config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::default(),
    };
    if args.random_ties {
        config.random_tie_break = true;
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

impl Session {
    pub fn new(ai_color: PieceColor, config: AiConfig, handoff: Option<PathBuf>) -> Self {
        let mut board = Board::new();
        board.new_game();
        Self {
            board,
            ai: GreedyAI::with_config(ai_color, config),
            human: ai_color.opponent(),
            handoff,
        }
    }

    /// Alternate between the human and the AI until the game ends or input runs out
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        loop {
            writeln!(output, "{}\n", self.board)?;

            match self.board.side_to_move() {
                Some(color) if color == self.human => {
                    let Some(line) = self.read_command(input)? else {
                        break;
                    };
                    match self.handle_command(&line) {
                        Reply::Continue(Some(message)) => writeln!(output, "{message}")?,
                        Reply::Continue(None) => {}
                        Reply::Quit => break,
                    }
                }
                Some(_) => match self.ai.next_step(&mut self.board) {
                    Some(action) => {
                        writeln!(output, "{action}")?;
                        self.write_handoff(&action)?;
                    }
                    None => {
                        writeln!(output, "{} has no legal action", self.ai.color())?;
                        break;
                    }
                },
                None => {
                    tracing::info!("Game finished: {}", self.board.status());
                    break;
                }
            }
            writeln!(output)?;
        }
        output.flush()?;
        Ok(())
    }

    /// Next human command, or None once input is exhausted
    fn read_command<R: BufRead>(&self, input: &mut R) -> Result<Option<String>> {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        // In handoff mode the stdin line only signals that the file is ready
        if let Some(path) = &self.handoff {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read handoff file: {}", path.display()))?;
            return Ok(Some(text.lines().next().unwrap_or_default().to_string()));
        }

        Ok(Some(line))
    }

    fn write_handoff(&self, action: &Action) -> Result<()> {
        if let Some(path) = &self.handoff {
            fs::write(path, action.to_string())
                .with_context(|| format!("Failed to write handoff file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Execute one human command line
    pub fn handle_command(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields.first().copied() {
            Some("m") | Some("e") => match Action::parse(line, self.human) {
                Ok(action) => match self.board.try_action(&action) {
                    Ok(()) => Reply::Continue(None),
                    Err(violation) => Reply::Continue(Some(format!("illegal action: {violation}"))),
                },
                Err(e) => Reply::Continue(Some(format!("invalid action: {e}"))),
            },
            Some("l") => Reply::Continue(Some(self.list_captures(&fields[1..]))),
            Some("n") => {
                self.board.new_game();
                Reply::Continue(Some("new game".to_string()))
            }
            Some("q") => Reply::Quit,
            _ => Reply::Continue(Some("invalid command".to_string())),
        }
    }

    fn list_captures(&self, args: &[&str]) -> String {
        let [x, y] = args else {
            return "usage: l <x> <y>".to_string();
        };
        let (Ok(x), Ok(y)) = (x.parse::<i8>(), y.parse::<i8>()) else {
            return "invalid coordinate".to_string();
        };

        let mut targets: Vec<Position> = self
            .board
            .legal_captures(Position::new(x, y), self.human)
            .into_iter()
            .collect();
        if targets.is_empty() {
            return "no captures".to_string();
        }
        targets.sort();
        targets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

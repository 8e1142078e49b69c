//! Klondike - Main Binary
//!
//! Text host for the solitaire engine and a batch autoplay tournament

use anyhow::Context;
use clap::{Parser, Subcommand};
use klondike_engine::{
    config::{DealCount, GameConfig},
    game::{Command, GameLogger, PointerDown, PointerUp, Solitaire, VerbosityLevel},
    piles::{Acceptance, PileId, StockClick},
    tournament::{print_summary, run_tourney, TourneyOptions},
    undo::Action,
    SolitaireError,
};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Verbosity level for game output (names or numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "solitaire")]
#[command(about = "Klondike solitaire engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Play {
        /// JSON config file; missing fields take their defaults
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Shuffle seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Cards turned per stock click (1 or 3)
        #[arg(long)]
        deal: Option<u8>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Autoplay many deals in parallel and report the win rate
    Tourney {
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Number of games
        #[arg(long, short = 'g', default_value_t = 1000)]
        games: usize,

        /// Tournament seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Moves per game before giving up
        #[arg(long, default_value_t = 2000)]
        max_moves: usize,

        /// Cards turned per stock click (1 or 3)
        #[arg(long)]
        deal: Option<u8>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            seed,
            deal,
            verbosity,
        } => {
            let mut config = load_config(config, deal)?;
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            run_play(config, verbosity.0)?
        }
        Commands::Tourney {
            config,
            games,
            seed,
            max_moves,
            deal,
        } => {
            let config = load_config(config, deal)?;
            let stats = run_tourney(
                &config,
                TourneyOptions {
                    games,
                    seed,
                    max_moves,
                },
            )?;
            print_summary(&stats);
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>, deal: Option<u8>) -> anyhow::Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::load_from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(deal) = deal {
        config = config.with_deal_count(DealCount::try_from(deal)?);
    }
    Ok(config)
}

/// One line of text-host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostCommand {
    ClickStock,
    Move {
        from: PileId,
        to: PileId,
        count: usize,
    },
    Game(Command),
    Show,
    Quit,
}

impl HostCommand {
    /// Parse `d`, `m <from> <to> [count]`, `u`, `r`, `n [1|3]`, `s`, `q`
    fn parse(line: &str) -> klondike_engine::Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let invalid = || SolitaireError::InvalidCommand(line.trim().to_string());

        match parts.as_slice() {
            ["d"] => Ok(HostCommand::ClickStock),
            ["u"] => Ok(HostCommand::Game(Command::Undo)),
            ["r"] => Ok(HostCommand::Game(Command::Redo)),
            ["s"] => Ok(HostCommand::Show),
            ["q"] => Ok(HostCommand::Quit),
            ["n"] => Ok(HostCommand::Game(Command::NewGame(DealCount::One))),
            ["n", deal] => {
                let deal: u8 = deal.parse().map_err(|_| invalid())?;
                Ok(HostCommand::Game(Command::NewGame(DealCount::try_from(deal)?)))
            }
            ["m", from, to] => Ok(HostCommand::Move {
                from: from.parse()?,
                to: to.parse()?,
                count: 1,
            }),
            ["m", from, to, count] => Ok(HostCommand::Move {
                from: from.parse()?,
                to: to.parse()?,
                count: count.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Move `count` cards from `from` onto exactly the pile `to`
///
/// Foundation drop zones overlap, so a drop there lands on whichever
/// foundation accepts the lot. Checking `to` first keeps the named pile the
/// only possible destination. Nothing changes when the move is refused.
fn host_move(
    game: &mut Solitaire,
    from: PileId,
    to: PileId,
    count: usize,
) -> std::result::Result<Action, String> {
    let cannot_take = || format!("Cannot take {count} card(s) from {from}");
    if from == PileId::Stock {
        return Err("The stock is dealt with d, not moved".to_string());
    }

    let board = game.board();
    let (Some(grab), Some(drop)) = (board.grab_point(from, count), board.drop_point(to)) else {
        return Err(cannot_take());
    };
    let cards = board.pile(from).cards();
    let lot = &cards[cards.len() - count..];
    if from == to || board.pile(to).try_accept(lot) != Acceptance::Accepted {
        return Err(format!("{to} does not accept that"));
    }

    match game.drag_to(grab, drop) {
        Some(PointerUp::Moved(action)) => Ok(action),
        Some(_) => Err(format!("{to} does not accept that")),
        None => Err(cannot_take()),
    }
}

fn run_play(config: GameConfig, verbosity: VerbosityLevel) -> anyhow::Result<()> {
    let mut game = Solitaire::with_logger(config, GameLogger::with_verbosity(verbosity))?;
    println!("Seed: {}", game.seed());
    println!("Commands: d (stock), m <from> <to> [count], u, r, n [1|3], s, q");
    print!("{}", game.snapshot());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match HostCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            HostCommand::Quit => break,
            HostCommand::Show => {}
            HostCommand::ClickStock => {
                let stock = game.board().grab_point(PileId::Stock, 1);
                match stock.map(|at| game.pointer_down(at)) {
                    Some(PointerDown::Stock(StockClick::Idle)) | None => {
                        println!("Nothing to deal")
                    }
                    _ => {}
                }
            }
            HostCommand::Move { from, to, count } => {
                if let Err(reason) = host_move(&mut game, from, to, count) {
                    println!("{reason}");
                }
            }
            HostCommand::Game(command) => game.apply(command),
        }

        print!("{}", game.snapshot());
        if game.won() {
            println!("You won!");
        }
        stdout.flush()?;
    }
    Ok(())
}

//! Game orchestration: the deal, the undo history and the win flag

use crate::board::Board;
use crate::config::{DealCount, GameConfig};
use crate::core::{Card, Rank, Size};
use crate::game::celebration::Celebration;
use crate::game::input::{Command, Drag};
use crate::game::logger::{GameLogger, VerbosityLevel};
use crate::piles::PileId;
use crate::undo::{Action, ActionManager};
use crate::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// A Klondike session
///
/// Owns every pile (through the [`Board`]), the undo history, the active
/// drag if any and the post-win animation. All rule state changes happen in
/// the pointer handlers and in [`Solitaire::apply`].
#[derive(Debug, Clone)]
pub struct Solitaire {
    pub(super) config: GameConfig,
    pub(super) board: Board,
    pub(super) actions: ActionManager,
    /// Shuffle stream; successive new games keep drawing from it
    pub(super) rng: ChaCha12Rng,
    seed: u64,
    pub(super) won: bool,
    pub(super) drag: Option<Drag>,
    pub(super) celebration: Celebration,
    pub(super) logger: GameLogger,
}

impl Solitaire {
    /// Validate `config`, build the board and deal the first game
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_logger(config, GameLogger::new())
    }

    pub fn with_logger(config: GameConfig, logger: GameLogger) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let board = Self::build_board(&config);
        let celebration = Celebration::new(config.celebration, seed);

        let mut game = Solitaire {
            config,
            board,
            actions: ActionManager::new(),
            rng: ChaCha12Rng::seed_from_u64(seed),
            seed,
            won: false,
            drag: None,
            celebration,
            logger,
        };
        game.board.deal(&mut game.rng);
        game.logger.event(
            VerbosityLevel::Normal,
            "deal",
            &format!(
                "New game (seed {seed}, deal {})",
                game.config.deal_count.count()
            ),
        );
        Ok(game)
    }

    fn build_board(config: &GameConfig) -> Board {
        Board::new(
            config.tableau_piles as usize,
            Rank::new(config.max_rank),
            config.deal_count.count(),
            config.layout(),
            config.window,
        )
    }

    /// Start a new game dealing `deal_count` cards per stock click
    ///
    /// The undo history, the win flag, any drag and the celebration are all
    /// discarded. The shuffle continues from the session's RNG, so each new
    /// game is a fresh deal.
    pub fn reset(&mut self, deal_count: DealCount) {
        self.config.deal_count = deal_count;
        let window = self.board.window();
        self.board = Self::build_board(&self.config);
        self.board.set_positions(window);
        self.board.deal(&mut self.rng);

        self.actions.clear();
        self.won = false;
        self.drag = None;
        self.celebration.reset();
        self.logger.event(
            VerbosityLevel::Normal,
            "deal",
            &format!("New game (deal {})", deal_count.count()),
        );
    }

    /// Set up a position by hand: replace the contents of pile `id`
    ///
    /// The undo history no longer describes the board afterwards, so it is
    /// cleared; `won` is recomputed.
    pub fn set_pile<I: IntoIterator<Item = Card>>(&mut self, id: PileId, cards: I) {
        self.cancel_drag();
        self.board.set_cards(id, cards);
        self.actions.clear();
        self.refresh_won();
    }

    /// Lay the board out again for a new window size
    pub fn resize(&mut self, window: Size) {
        self.board.set_positions(window);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::NewGame(deal_count) => self.reset(deal_count),
        }
    }

    /// Undo the last move; a drag in progress is cancelled first
    pub fn undo(&mut self) -> Option<Action> {
        self.cancel_drag();
        let action = self.actions.undo(&mut self.board)?;
        self.logger.event(
            VerbosityLevel::Normal,
            "history",
            &format!("Undo {}", describe(&action)),
        );
        self.refresh_won();
        Some(action)
    }

    /// Redo the last undone move; a drag in progress is cancelled first
    pub fn redo(&mut self) -> Option<Action> {
        self.cancel_drag();
        let action = self.actions.redo(&mut self.board)?;
        self.logger.event(
            VerbosityLevel::Normal,
            "history",
            &format!("Redo {}", describe(&action)),
        );
        self.refresh_won();
        Some(action)
    }

    /// Recompute `won` from the foundations
    ///
    /// Losing the win (by undoing past it) resets the celebration.
    pub(super) fn refresh_won(&mut self) {
        let won = self.board.foundations_complete();
        if won && !self.won {
            self.logger.event(VerbosityLevel::Minimal, "win", "Game won!");
        }
        if !won {
            self.celebration.reset();
        }
        self.won = won;
    }

    /// Advance the post-win animation by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if self.won {
            self.celebration.tick(dt, &self.board);
        }
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn actions(&self) -> &ActionManager {
        &self.actions
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    /// Seed the first deal was shuffled with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

pub(super) fn describe(action: &Action) -> String {
    let (from, to) = action.piles();
    match action {
        Action::Transfer { revealed, .. } => format!(
            "{} card(s) {from} -> {to}{}",
            action.count(),
            if *revealed { " (revealed)" } else { "" }
        ),
        Action::StockFlip { .. } => format!("flip {} card(s) {from} -> {to}", action.count()),
    }
}

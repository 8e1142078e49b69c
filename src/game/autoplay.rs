//! Automatic play through the pointer protocol
//!
//! Moves are enumerated from the rules, but executed only as pointer events
//! at coordinates taken from the piles' hit regions. A game played here goes
//! through exactly the code path a human's mouse would.

use crate::board::Board;
use crate::game::input::{PointerDown, PointerUp};
use crate::game::snapshot::compute_state_hash;
use crate::game::state::Solitaire;
use crate::piles::{tableau, Acceptance, PileId, PileKind, StockClick};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rustc_hash::FxHashSet;

/// A move a player could make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    ClickStock,
    Transfer {
        from: PileId,
        to: PileId,
        count: usize,
    },
}

/// Every move the rules allow on `board`
///
/// Moving a whole king-headed tableau pile onto an empty one is left out;
/// it changes nothing but the column.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    if !board.pile(PileId::Stock).is_empty() || !board.pile(PileId::Waste).is_empty() {
        moves.push(Move::ClickStock);
    }

    for source in board.piles() {
        let cards = source.cards();
        let counts = match source.kind() {
            PileKind::Stock => 0..=0,
            PileKind::Waste { .. } | PileKind::Foundation { .. } => {
                if cards.is_empty() {
                    0..=0
                } else {
                    1..=1
                }
            }
            PileKind::Tableau { .. } => 1..=tableau::face_up_run(cards),
        };

        for count in counts.filter(|&n| n > 0) {
            let lot = &cards[cards.len() - count..];
            if source.id().is_tableau() && !tableau::is_valid_run(lot) {
                continue;
            }
            for target in board.drop_targets() {
                if target == source.id() {
                    continue;
                }
                let dest = board.pile(target);
                if dest.try_accept(lot) != Acceptance::Accepted {
                    continue;
                }
                if target.is_tableau()
                    && dest.is_empty()
                    && count == cards.len()
                    && source.id().is_tableau()
                {
                    continue;
                }
                moves.push(Move::Transfer {
                    from: source.id(),
                    to: target,
                    count,
                });
            }
        }
    }
    moves
}

/// Perform `mv` with pointer events; true if it changed the board
pub fn execute(game: &mut Solitaire, mv: Move) -> bool {
    match mv {
        Move::ClickStock => {
            let Some(at) = game.board().grab_point(PileId::Stock, 1) else {
                return false;
            };
            matches!(
                game.pointer_down(at),
                PointerDown::Stock(StockClick::Dealt(_) | StockClick::Reloaded(_))
            )
        }
        Move::Transfer { from, to, count } => {
            let (Some(grab), Some(drop)) = (
                game.board().grab_point(from, count),
                game.board().drop_point(to),
            ) else {
                return false;
            };
            matches!(game.drag_to(grab, drop), Some(PointerUp::Moved(_)))
        }
    }
}

/// Outcome of an automatic game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayResult {
    pub won: bool,
    /// Moves that stuck (not counting ones undone for revisiting a position)
    pub moves: usize,
    /// Positions seen, including the deal
    pub positions: usize,
}

/// Picks moves at random, trying foundation moves first
pub struct RandomPlayer {
    rng: Xoshiro256PlusPlus,
}

impl RandomPlayer {
    pub fn with_seed(seed: u64) -> Self {
        RandomPlayer {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Candidate moves in the order they will be tried
    pub fn rank_moves(&mut self, board: &Board) -> Vec<Move> {
        let (mut home, mut rest): (Vec<_>, Vec<_>) = legal_moves(board)
            .into_iter()
            .partition(|mv| matches!(mv, Move::Transfer { to, .. } if to.is_foundation()));
        home.shuffle(&mut self.rng);
        rest.shuffle(&mut self.rng);
        home.extend(rest);
        home
    }

    /// Play until the game is won, no move reaches an unseen position, or
    /// `max_moves` moves have been made
    ///
    /// A move that lands on a position already seen is undone and the next
    /// candidate tried.
    pub fn play_out(&mut self, game: &mut Solitaire, max_moves: usize) -> PlayResult {
        let mut seen = FxHashSet::default();
        seen.insert(compute_state_hash(game.board()));
        let mut moves = 0;

        while !game.won() && moves < max_moves {
            let mut progressed = false;
            for mv in self.rank_moves(game.board()) {
                if !execute(game, mv) {
                    continue;
                }
                if seen.insert(compute_state_hash(game.board())) {
                    progressed = true;
                    break;
                }
                game.undo();
            }
            if !progressed {
                break;
            }
            moves += 1;
        }

        PlayResult {
            won: game.won(),
            moves,
            positions: seen.len(),
        }
    }
}

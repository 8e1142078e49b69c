//! Pile snapshots and deterministic state hashing
//!
//! A snapshot is every pile as an ordered list of `(rank, suit, face_up)`
//! triples, bottom card first. It is what tests compare and what the
//! autoplayer hashes to avoid revisiting positions.

use crate::board::Board;
use crate::core::{Card, Suit};
use crate::game::state::Solitaire;
use crate::piles::PileId;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One card as the host sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardView {
    pub rank: u8,
    pub suit: Suit,
    pub face_up: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        CardView {
            rank: card.rank().value(),
            suit: card.suit(),
            face_up: card.is_face_up(),
        }
    }
}

impl From<CardView> for (u8, Suit, bool) {
    fn from(view: CardView) -> Self {
        (view.rank, view.suit, view.face_up)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileSnapshot {
    pub id: PileId,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub piles: Vec<PileSnapshot>,
    pub won: bool,
}

impl BoardSnapshot {
    /// Snapshot a board; `won` is read from the foundations
    pub fn of(board: &Board) -> Self {
        BoardSnapshot {
            piles: board
                .piles()
                .map(|pile| PileSnapshot {
                    id: pile.id(),
                    cards: pile.cards().iter().map(CardView::from).collect(),
                })
                .collect(),
            won: board.foundations_complete(),
        }
    }

    pub fn pile(&self, id: PileId) -> Option<&PileSnapshot> {
        self.piles.iter().find(|p| p.id == id)
    }

    /// The triples of pile `id`, bottom first
    pub fn triples(&self, id: PileId) -> Vec<(u8, Suit, bool)> {
        self.pile(id)
            .map(|p| p.cards.iter().copied().map(Into::into).collect())
            .unwrap_or_default()
    }
}

/// One line per pile, e.g. `t2: ## Q♥ J♠`
impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pile in &self.piles {
            write!(f, "{:>5}:", pile.id.to_string())?;
            for view in &pile.cards {
                let card = Card::from(*view);
                write!(f, " {card}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<CardView> for Card {
    fn from(view: CardView) -> Self {
        let mut card = Card::new(crate::core::Rank::new(view.rank), view.suit);
        card.flip(view.face_up);
        card
    }
}

/// Hash of every pile's contents and orientation
///
/// Hit regions, the undo history, the logger and the celebration are not
/// part of the hash: two boards with the same cards in the same places hash
/// the same however they got there.
pub fn compute_state_hash(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    for pile in board.piles() {
        pile.id().hash(&mut hasher);
        pile.cards().hash(&mut hasher);
    }
    hasher.finish()
}

impl Solitaire {
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snapshot = BoardSnapshot::of(&self.board);
        snapshot.won = self.won;
        snapshot
    }

    pub fn state_hash(&self) -> u64 {
        compute_state_hash(&self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::Point;

    #[test]
    fn test_snapshot_matches_board() {
        let game = Solitaire::new(GameConfig::default().with_seed(8)).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.piles.len(), 2 + 7 + 4);

        let t1 = snapshot.triples(PileId::Tableau(1));
        assert_eq!(t1.len(), 2);
        assert!(!t1[0].2);
        assert!(t1[1].2);
        assert!(!snapshot.won);
    }

    #[test]
    fn test_hash_ignores_history() {
        let mut game = Solitaire::new(GameConfig::default().with_seed(8)).unwrap();
        let start = game.state_hash();

        let stock = game.board().pile(PileId::Stock).rect();
        game.pointer_down(Point::new(stock.x + 1, stock.y + 1));
        assert_ne!(game.state_hash(), start);

        game.undo();
        assert_eq!(game.state_hash(), start);
        assert!(game.actions().can_redo());
    }

    #[test]
    fn test_card_view_round_trip() {
        let mut card = Card::new(crate::core::Rank::new(12), Suit::Hearts);
        card.flip(true);
        assert_eq!(Card::from(CardView::from(&card)), card);
    }

    #[test]
    fn test_display_lists_every_pile() {
        let game = Solitaire::new(GameConfig::default().with_seed(8)).unwrap();
        let text = game.snapshot().to_string();
        assert_eq!(text.lines().count(), 13);
        assert!(text.lines().any(|l| l.trim_start().starts_with("stock:")));
        assert!(text.contains("##"));
    }
}

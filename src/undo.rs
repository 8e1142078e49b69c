//! Undo/redo log of pile transfers
//!
//! Every successful move is recorded as an [`Action`] naming the two piles it
//! touched. Replaying an action forward (`redo`) or backward (`undo`) only
//! ever mutates those two piles; anything derived from the whole board (the
//! won flag, the celebration) is recomputed by the caller afterwards.

use crate::board::Board;
use crate::piles::PileId;
use serde::{Deserialize, Serialize};

/// A recorded, invertible move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// A dragged lot that was accepted by another pile
    Transfer {
        from: PileId,
        to: PileId,
        count: usize,
        /// The move turned the source pile's new top card face up
        revealed: bool,
    },

    /// A stock click: cards popped one at a time from `from` onto `to`,
    /// each turned to `face_up` on arrival
    StockFlip {
        from: PileId,
        to: PileId,
        count: usize,
        face_up: bool,
    },
}

impl Action {
    /// The (source, destination) piles this action touches
    pub fn piles(&self) -> (PileId, PileId) {
        match *self {
            Action::Transfer { from, to, .. } | Action::StockFlip { from, to, .. } => (from, to),
        }
    }

    pub fn count(&self) -> usize {
        match *self {
            Action::Transfer { count, .. } | Action::StockFlip { count, .. } => count,
        }
    }

    /// Replay the action forward
    pub fn redo(&self, board: &mut Board) {
        let layout = *board.layout();
        match *self {
            Action::Transfer {
                from,
                to,
                count,
                revealed,
            } => {
                let (src, dst) = board.pair_mut(from, to);
                let lot = src.take_top(count);
                if revealed {
                    if let Some(top) = src.top_mut() {
                        top.flip(true);
                    }
                }
                src.recompute_hit_regions(&layout);
                dst.place_lot(lot, &layout);
            }
            Action::StockFlip {
                from,
                to,
                count,
                face_up,
            } => {
                let (src, dst) = board.pair_mut(from, to);
                for _ in 0..count {
                    let Some(mut card) = src.pop() else {
                        break;
                    };
                    card.flip(face_up);
                    dst.push(card);
                }
                src.recompute_hit_regions(&layout);
                dst.recompute_hit_regions(&layout);
            }
        }
    }

    /// Replay the action backward, restoring both piles exactly
    pub fn undo(&self, board: &mut Board) {
        let layout = *board.layout();
        match *self {
            Action::Transfer {
                from,
                to,
                count,
                revealed,
            } => {
                let (src, dst) = board.pair_mut(from, to);
                let lot = dst.take_top(count);
                if revealed {
                    if let Some(top) = src.top_mut() {
                        top.flip(false);
                    }
                }
                dst.recompute_hit_regions(&layout);
                src.place_lot(lot, &layout);
            }
            Action::StockFlip {
                from,
                to,
                count,
                face_up,
            } => {
                let (src, dst) = board.pair_mut(from, to);
                for _ in 0..count {
                    let Some(mut card) = dst.pop() else {
                        break;
                    };
                    card.flip(!face_up);
                    src.push(card);
                }
                src.recompute_hit_regions(&layout);
                dst.recompute_hit_regions(&layout);
            }
        }
    }
}

/// Undo and redo stacks
///
/// Recording a new action discards the redo stack: history does not branch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionManager {
    /// Most recent action at the end
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
}

impl ActionManager {
    pub fn new() -> Self {
        ActionManager::default()
    }

    pub fn record(&mut self, action: Action) {
        self.undo_stack.push(action);
        self.redo_stack.clear();
    }

    /// Reverse the most recent action
    ///
    /// Returns the action that was undone, or `None` (and touches nothing)
    /// if there is nothing to undo.
    pub fn undo(&mut self, board: &mut Board) -> Option<Action> {
        let action = self.undo_stack.pop()?;
        action.undo(board);
        self.redo_stack.push(action);
        Some(action)
    }

    /// Replay the most recently undone action
    pub fn redo(&mut self, board: &mut Board) -> Option<Action> {
        let action = self.redo_stack.pop()?;
        action.redo(board);
        self.undo_stack.push(action);
        Some(action)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Recorded actions, oldest first
    pub fn history(&self) -> &[Action] {
        &self.undo_stack
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

//! Pointer protocol and keyboard commands
//!
//! A move is one pointer gesture: press on a pile to lift a lot, release
//! over another pile to drop it. Everything the host needs to drive a game
//! comes through these handlers and [`Command`].

use crate::config::DealCount;
use crate::core::Point;
use crate::game::state::{describe, Solitaire};
use crate::game::logger::VerbosityLevel;
use crate::piles::{Acceptance, Lot, PickUp, PileId, StockClick};
use crate::undo::Action;
use serde::{Deserialize, Serialize};

macro_rules! log_if_verbose {
    ($self:expr, $category:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self
                .logger
                .event(VerbosityLevel::Verbose, $category, &format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
        }
    };
}

/// Discrete commands a host forwards from its keyboard or menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Undo,
    Redo,
    NewGame(DealCount),
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn ctrl(key: char) -> Self {
        KeyChord {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(key: char) -> Self {
        KeyChord {
            key,
            ctrl: true,
            shift: true,
        }
    }

    /// Ctrl+Z undoes; Ctrl+Shift+Z and Ctrl+Y redo
    pub fn command(&self) -> Option<Command> {
        if !self.ctrl {
            return None;
        }
        match (self.key.to_ascii_lowercase(), self.shift) {
            ('z', false) => Some(Command::Undo),
            ('z', true) | ('y', _) => Some(Command::Redo),
            _ => None,
        }
    }
}

/// The lot currently held by the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    source: PileId,
    lot: Lot,
    /// From the pointer to the top-left of the lot's bottom card
    offset: Point,
    pointer: Point,
}

impl Drag {
    pub fn source(&self) -> PileId {
        self.source
    }

    pub fn lot(&self) -> &Lot {
        &self.lot
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Where the lot's bottom card is drawn
    pub fn origin(&self) -> Point {
        self.pointer + self.offset
    }
}

/// What a pointer press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// The game is won or a drag is already in progress
    Ignored,
    /// No pile under the pointer
    Missed,
    /// The stock was clicked
    Stock(StockClick),
    /// The pile under the pointer has no cards
    Empty(PileId),
    /// The pile under the pointer refused to give up cards there
    Denied(PileId),
    /// A lot of `count` cards is now held
    Grabbed { source: PileId, count: usize },
}

/// What a pointer release did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerUp {
    /// Nothing was held
    NoDrag,
    /// The lot was accepted and this action recorded
    Moved(Action),
    /// No pile accepted the lot; it went back to its source unchanged
    Returned(PileId),
}

impl Solitaire {
    /// Press at `pos`
    ///
    /// Piles are searched in board order (stock, waste, tableau left to
    /// right, foundations) and the first whose pickup region contains `pos`
    /// handles the press.
    pub fn pointer_down(&mut self, pos: Point) -> PointerDown {
        if self.won || self.drag.is_some() {
            return PointerDown::Ignored;
        }
        let Some(id) = self.board.pile_at(pos) else {
            return PointerDown::Missed;
        };

        if id == PileId::Stock {
            return PointerDown::Stock(self.click_stock());
        }

        let layout = *self.board.layout();
        let pile = self.board.pile_mut(id);
        match pile.try_pick_up(pos, &layout) {
            PickUp::Empty => PointerDown::Empty(id),
            PickUp::Denied => PointerDown::Denied(id),
            PickUp::Lot(lot) => {
                let origin = pile.card_origin(pile.len(), &layout);
                let count = lot.len();
                log_if_verbose!(self, "move", "Picked up {count} card(s) from {id}");
                self.drag = Some(Drag {
                    source: id,
                    lot,
                    offset: origin - pos,
                    pointer: pos,
                });
                PointerDown::Grabbed { source: id, count }
            }
        }
    }

    fn click_stock(&mut self) -> StockClick {
        let outcome = self.board.click_stock(self.config.deal_count.count());
        let action = match outcome {
            StockClick::Dealt(count) => Some(Action::StockFlip {
                from: PileId::Stock,
                to: PileId::Waste,
                count,
                face_up: true,
            }),
            StockClick::Reloaded(count) => Some(Action::StockFlip {
                from: PileId::Waste,
                to: PileId::Stock,
                count,
                face_up: false,
            }),
            StockClick::Idle => None,
        };
        if let Some(action) = action {
            log_if_verbose!(self, "stock", "Stock: {}", describe(&action));
            self.actions.record(action);
        }
        outcome
    }

    /// Track the pointer while dragging; purely cosmetic
    pub fn pointer_moved(&mut self, pos: Point) -> bool {
        match &mut self.drag {
            Some(drag) => {
                drag.pointer = pos;
                true
            }
            None => false,
        }
    }

    /// Release at `pos`
    ///
    /// The lot goes to the first tableau or foundation pile, other than its
    /// source, whose drop region contains `pos` and which accepts it.
    pub fn pointer_up(&mut self, pos: Point) -> PointerUp {
        let Some(drag) = self.drag.take() else {
            return PointerUp::NoDrag;
        };
        let Drag { source, lot, .. } = drag;
        let layout = *self.board.layout();

        let target = self.board.drop_targets().find(|&id| {
            let pile = self.board.pile(id);
            id != source
                && pile.drop_rect().contains(pos)
                && pile.try_accept(&lot) == Acceptance::Accepted
        });

        let Some(to) = target else {
            log_if_verbose!(self, "move", "Returned {} card(s) to {source}", lot.len());
            self.board.pile_mut(source).return_lot(lot, &layout);
            return PointerUp::Returned(source);
        };

        let count = lot.len();
        let (src, dst) = self.board.pair_mut(source, to);
        dst.place_lot(lot, &layout);
        let revealed = src.on_cards_removed(&layout);

        let action = Action::Transfer {
            from: source,
            to,
            count,
            revealed,
        };
        log_if_verbose!(self, "move", "Moved {}", describe(&action));
        self.actions.record(action);

        if to.is_foundation() {
            self.refresh_won();
        }
        PointerUp::Moved(action)
    }

    /// Put a held lot back on its source pile; true if there was one
    pub fn cancel_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let layout = *self.board.layout();
        self.board
            .pile_mut(drag.source)
            .return_lot(drag.lot, &layout);
        true
    }

    /// Press and release in one call, as a click
    pub fn click(&mut self, pos: Point) -> PointerDown {
        let down = self.pointer_down(pos);
        if let PointerDown::Grabbed { .. } = down {
            self.pointer_up(pos);
        }
        down
    }

    /// Drag from `from` to `to` in one call
    pub fn drag_to(&mut self, from: Point, to: Point) -> Option<PointerUp> {
        match self.pointer_down(from) {
            PointerDown::Grabbed { .. } => {
                self.pointer_moved(to);
                Some(self.pointer_up(to))
            }
            _ => None,
        }
    }
}

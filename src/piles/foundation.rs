//! Foundation rules: one suit, built upward from the ace

use super::{Lot, PickUp, Pile};
use crate::core::{Card, Rank, Suit};

/// Only the top card ever leaves a foundation
pub(super) fn pick_up(pile: &mut Pile) -> PickUp {
    match pile.pop() {
        Some(card) => {
            let mut lot = Lot::new();
            lot.push(card);
            PickUp::Lot(lot)
        }
        None => PickUp::Empty,
    }
}

/// A single card of the foundation's suit, one rank above the current top
/// (or an ace on an empty foundation)
pub fn accepts(top: Option<&Card>, lot: &[Card], suit: Suit) -> bool {
    let [card] = lot else {
        return false;
    };
    if card.suit() != suit {
        return false;
    }
    match top {
        Some(top) => top.rank().is_one_below(card.rank()),
        None => card.rank() == Rank::ACE,
    }
}

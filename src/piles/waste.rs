//! Waste rules: only the frontmost card of the fan can be dragged

use super::{Lot, PickUp, Pile, PileKind};
use crate::core::{Layout, Rect};

/// The pickup region covers the last slot of the fan, where the top card is drawn
pub fn click_rect(anchor: Rect, visible: usize, layout: &Layout) -> Rect {
    let offset = layout.card_spacing * (visible.max(1) as i32 - 1);
    Rect::new(anchor.x, anchor.y + offset, layout.card.width, layout.card.height)
}

pub(super) fn pick_up(pile: &mut Pile) -> PickUp {
    let Some(card) = pile.pop() else {
        return PickUp::Empty;
    };
    if let PileKind::Waste { dragging, .. } = &mut pile.kind {
        *dragging = true;
    }
    let mut lot = Lot::new();
    lot.push(card);
    PickUp::Lot(lot)
}

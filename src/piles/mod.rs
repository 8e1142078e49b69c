//! Piles (Stock, Waste, Tableau, Foundation) and their pickup/drop rules
//!
//! Every pile shares one storage type, [`Pile`], and one fixed set of
//! capabilities: pick up, accept, post-removal hook and hit-region
//! recomputation. Which rule applies is selected by [`PileKind`]; the
//! per-variant rules live in the submodules.

pub mod foundation;
pub mod stock;
pub mod tableau;
pub mod waste;

use crate::core::{Card, Layout, Point, Rank, Rect, Suit};
use crate::{Result, SolitaireError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

pub use stock::StockClick;

/// A contiguous run of cards being relocated, bottommost card first
pub type Lot = SmallVec<[Card; 13]>;

/// Identifies a pile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PileId {
    Stock,
    Waste,
    /// Tableau pile, 0-indexed from the left
    Tableau(u8),
    /// Foundation pile, 0-indexed in [`Suit::ALL`] order
    Foundation(u8),
}

impl PileId {
    pub fn is_tableau(&self) -> bool {
        matches!(self, PileId::Tableau(_))
    }

    pub fn is_foundation(&self) -> bool {
        matches!(self, PileId::Foundation(_))
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => write!(f, "stock"),
            PileId::Waste => write!(f, "waste"),
            PileId::Tableau(i) => write!(f, "t{}", i + 1),
            PileId::Foundation(i) => write!(f, "f{}", i + 1),
        }
    }
}

impl FromStr for PileId {
    type Err = SolitaireError;

    /// Parses the names produced by `Display` (`stock`, `waste`, `t1`.., `f1`..)
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "stock" | "s" => return Ok(PileId::Stock),
            "waste" | "w" => return Ok(PileId::Waste),
            _ => {}
        }

        let parse_index = |digits: &str| -> Result<u8> {
            match digits.parse::<u8>() {
                Ok(n) if n >= 1 => Ok(n - 1),
                _ => Err(SolitaireError::UnknownPile(s.to_string())),
            }
        };

        if let Some(rest) = lower.strip_prefix('t') {
            Ok(PileId::Tableau(parse_index(rest)?))
        } else if let Some(rest) = lower.strip_prefix('f') {
            Ok(PileId::Foundation(parse_index(rest)?))
        } else {
            Err(SolitaireError::UnknownPile(s.to_string()))
        }
    }
}

/// The rule set a pile follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PileKind {
    Stock,
    Waste {
        /// How many cards of the fan are shown (equals the deal count)
        visible: usize,
        /// Set while the top card is held in a drag
        dragging: bool,
    },
    Tableau {
        /// The only rank an empty tableau pile accepts
        king: Rank,
    },
    Foundation {
        suit: Suit,
    },
}

/// Result of a pickup attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickUp {
    /// The pile has no cards
    Empty,
    /// The pile has cards but none may be dragged from this position
    Denied,
    /// These cards left the pile and are now held by the caller
    Lot(Lot),
}

/// Result of offering a lot to a pile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    Accepted,
    Rejected,
}

/// An ordered pile of cards; index 0 is the bottom, the last card is on top
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pile {
    id: PileId,
    kind: PileKind,
    cards: Vec<Card>,
    /// Where the pile is anchored on screen
    rect: Rect,
    /// Region that starts a pickup
    click_rect: Rect,
    /// Region that receives drops
    drop_rect: Rect,
}

impl Pile {
    pub fn new(id: PileId, kind: PileKind) -> Self {
        Pile {
            id,
            kind,
            cards: Vec::new(),
            rect: Rect::default(),
            click_rect: Rect::default(),
            drop_rect: Rect::default(),
        }
    }

    pub fn id(&self) -> PileId {
        self.id
    }

    pub fn kind(&self) -> PileKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn click_rect(&self) -> Rect {
        self.click_rect
    }

    pub fn drop_rect(&self) -> Rect {
        self.drop_rect
    }

    pub fn face_down_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_face_up()).count()
    }

    /// Is the waste's top card currently held in a drag?
    pub fn is_dragging(&self) -> bool {
        matches!(self.kind, PileKind::Waste { dragging: true, .. })
    }

    /// Where the card at `index` is drawn
    ///
    /// Stock and foundation stack every card on the anchor. The waste keeps
    /// its top card in the last slot of the fan, counting a dragged card as
    /// still present. Tableau cards are spaced from the anchor down.
    pub fn card_origin(&self, index: usize, layout: &Layout) -> Point {
        let anchor = self.rect.top_left();
        match self.kind {
            PileKind::Stock | PileKind::Foundation { .. } => anchor,
            PileKind::Waste { visible, dragging } => {
                let len = self.cards.len() + usize::from(dragging);
                let slot = visible as i32 - (len as i32 - index as i32);
                Point::new(anchor.x, anchor.y + slot * layout.card_spacing)
            }
            PileKind::Tableau { .. } => {
                Point::new(anchor.x, anchor.y + index as i32 * layout.card_spacing)
            }
        }
    }

    /// Try to lift cards off this pile at `pos`
    ///
    /// The stock never yields a lot; clicking it is handled by
    /// [`stock::click`], which needs the waste as well.
    pub fn try_pick_up(&mut self, pos: Point, layout: &Layout) -> PickUp {
        if self.cards.is_empty() {
            return PickUp::Empty;
        }
        if !self.click_rect.contains(pos) {
            return PickUp::Denied;
        }
        match self.kind {
            PileKind::Stock => PickUp::Denied,
            PileKind::Waste { .. } => waste::pick_up(self),
            PileKind::Tableau { .. } => tableau::pick_up(self, pos, layout),
            PileKind::Foundation { .. } => foundation::pick_up(self),
        }
    }

    /// Would this pile take `lot` on top of its current top card?
    pub fn try_accept(&self, lot: &[Card]) -> Acceptance {
        let accepted = match self.kind {
            PileKind::Stock | PileKind::Waste { .. } => false,
            PileKind::Tableau { king } => tableau::accepts(self.peek_top(), lot, king),
            PileKind::Foundation { suit } => foundation::accepts(self.peek_top(), lot, suit),
        };
        if accepted {
            Acceptance::Accepted
        } else {
            Acceptance::Rejected
        }
    }

    /// Hook run on the source pile after a lot has been accepted elsewhere
    ///
    /// Returns true if the hook turned a face-down card face up.
    pub fn on_cards_removed(&mut self, layout: &Layout) -> bool {
        let revealed = match &mut self.kind {
            PileKind::Waste { dragging, .. } => {
                *dragging = false;
                false
            }
            PileKind::Tableau { .. } => tableau::reveal_top(&mut self.cards),
            PileKind::Stock | PileKind::Foundation { .. } => false,
        };
        self.recompute_hit_regions(layout);
        revealed
    }

    /// Put a rejected lot back where it came from, preserving its order
    pub fn return_lot(&mut self, lot: Lot, layout: &Layout) {
        if let PileKind::Waste { dragging, .. } = &mut self.kind {
            *dragging = false;
        }
        self.cards.extend(lot);
        self.recompute_hit_regions(layout);
    }

    /// Place an accepted lot on top of this pile, preserving its order
    pub fn place_lot(&mut self, lot: Lot, layout: &Layout) {
        self.cards.extend(lot);
        self.recompute_hit_regions(layout);
    }

    /// Move the pile's anchor and recompute the regions derived from it
    pub fn set_anchor(&mut self, rect: Rect, layout: &Layout) {
        self.rect = rect;
        self.recompute_hit_regions(layout);
    }

    pub fn set_drop_rect(&mut self, rect: Rect) {
        self.drop_rect = rect;
    }

    /// Recompute the pickup region from the pile's anchor and contents
    pub fn recompute_hit_regions(&mut self, layout: &Layout) {
        self.click_rect = match self.kind {
            PileKind::Stock | PileKind::Foundation { .. } => self.rect,
            PileKind::Waste { visible, .. } => waste::click_rect(self.rect, visible, layout),
            PileKind::Tableau { .. } => {
                tableau::click_rect(self.rect, self.face_down_count(), self.cards.len(), layout)
            }
        };
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    /// Take the top `count` cards off the pile, keeping their order
    pub(crate) fn take_top(&mut self, count: usize) -> Lot {
        let split = self.cards.len().saturating_sub(count);
        self.cards.drain(split..).collect()
    }

    pub(crate) fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
        if let PileKind::Waste { dragging, .. } = &mut self.kind {
            *dragging = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_id_round_trip() {
        for id in [
            PileId::Stock,
            PileId::Waste,
            PileId::Tableau(0),
            PileId::Tableau(6),
            PileId::Foundation(3),
        ] {
            assert_eq!(id.to_string().parse::<PileId>().unwrap(), id);
        }
        assert_eq!("T3".parse::<PileId>().unwrap(), PileId::Tableau(2));
        assert!("t0".parse::<PileId>().is_err());
        assert!("x1".parse::<PileId>().is_err());
    }

    #[test]
    fn test_take_top_keeps_order() {
        let mut pile = Pile::new(PileId::Tableau(0), PileKind::Tableau { king: Rank::KING });
        for r in 1..=4 {
            pile.push(Card::face_up(Rank::new(r), Suit::Spades));
        }

        let lot = pile.take_top(2);
        assert_eq!(lot[0].rank(), Rank::new(3));
        assert_eq!(lot[1].rank(), Rank::new(4));
        assert_eq!(pile.len(), 2);

        let lot = pile.take_top(5);
        assert_eq!(lot.len(), 2);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_empty_pickup_is_distinct_from_denied() {
        let layout = Layout::default();
        let mut pile = Pile::new(PileId::Foundation(0), PileKind::Foundation { suit: Suit::Spades });
        pile.set_anchor(Rect::new(0, 0, 51, 69), &layout);
        assert_eq!(pile.try_pick_up(Point::new(5, 5), &layout), PickUp::Empty);

        pile.push(Card::face_up(Rank::ACE, Suit::Spades));
        assert_eq!(pile.try_pick_up(Point::new(500, 500), &layout), PickUp::Denied);
        assert!(matches!(pile.try_pick_up(Point::new(5, 5), &layout), PickUp::Lot(_)));
    }

    #[test]
    fn test_waste_card_origin_keeps_dragged_slot() {
        let layout = Layout::default();
        let mut waste = Pile::new(
            PileId::Waste,
            PileKind::Waste {
                visible: 3,
                dragging: false,
            },
        );
        waste.set_anchor(Rect::new(10, 100, 51, 69), &layout);
        for r in 1..=4 {
            waste.push(Card::face_up(Rank::new(r), Suit::Hearts));
        }
        // top card sits in the last of three slots
        assert_eq!(waste.card_origin(3, &layout), Point::new(10, 148));
        assert_eq!(waste.card_origin(1, &layout), Point::new(10, 100));

        let click = waste.click_rect();
        assert!(matches!(
            waste.try_pick_up(Point::new(click.x + 1, click.y + 1), &layout),
            PickUp::Lot(_)
        ));
        assert_eq!(waste.card_origin(3, &layout), Point::new(10, 148));
        assert_eq!(waste.card_origin(2, &layout), Point::new(10, 124));
    }

    #[test]
    fn test_stock_and_waste_never_accept() {
        let stock = Pile::new(PileId::Stock, PileKind::Stock);
        let waste = Pile::new(
            PileId::Waste,
            PileKind::Waste {
                visible: 1,
                dragging: false,
            },
        );
        let lot = [Card::face_up(Rank::KING, Suit::Hearts)];
        assert_eq!(stock.try_accept(&lot), Acceptance::Rejected);
        assert_eq!(waste.try_accept(&lot), Acceptance::Rejected);
    }
}

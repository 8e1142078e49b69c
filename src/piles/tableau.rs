//! Tableau rules: descending runs of alternating colour
//!
//! Every card in a tableau pile is drawn `card_spacing` below the one under
//! it, face down or not. The pickup region therefore starts below the last
//! face-down card and reaches the bottom edge of the top card; the pointer's
//! height inside that region decides how many cards are lifted.

use super::{PickUp, Pile};
use crate::core::{Card, Layout, Point, Rank, Rect};

pub fn click_rect(anchor: Rect, face_down: usize, len: usize, layout: &Layout) -> Rect {
    let face_up = len as i32 - face_down as i32;
    Rect::new(
        anchor.x,
        anchor.y + face_down as i32 * layout.card_spacing,
        layout.card.width,
        layout.card.height + (face_up - 1) * layout.card_spacing,
    )
}

/// How many cards a press at height `y` lifts from a pile whose pickup
/// region ends at `bottom`
///
/// Anywhere on the fully visible top card lifts one card; each
/// `card_spacing` band above it adds one more.
pub fn grab_count(bottom: i32, y: i32, layout: &Layout) -> usize {
    if bottom - y < layout.card.height {
        1
    } else {
        ((bottom - layout.card.height - y).div_euclid(layout.card_spacing) + 2) as usize
    }
}

/// The trailing run of face-up cards
pub fn face_up_run(cards: &[Card]) -> usize {
    cards.iter().rev().take_while(|c| c.is_face_up()).count()
}

/// Face up, each card one rank below and opposite in colour to the card beneath it
pub fn is_valid_run(run: &[Card]) -> bool {
    run.iter().all(|c| c.is_face_up())
        && run
            .windows(2)
            .all(|w| w[0].colour() != w[1].colour() && w[1].rank().is_one_below(w[0].rank()))
}

pub(super) fn pick_up(pile: &mut Pile, pos: Point, layout: &Layout) -> PickUp {
    let available = face_up_run(&pile.cards);
    if available == 0 {
        return PickUp::Denied;
    }

    let count = grab_count(pile.click_rect.bottom(), pos.y, layout).min(available);
    let run = &pile.cards[pile.cards.len() - count..];
    if !is_valid_run(run) {
        return PickUp::Denied;
    }
    PickUp::Lot(pile.take_top(count))
}

/// An empty pile takes a lot headed by the top rank; otherwise the lot's
/// bottom card must be one rank lower and the other colour
pub fn accepts(top: Option<&Card>, lot: &[Card], king: Rank) -> bool {
    let Some(bottom) = lot.first() else {
        return false;
    };
    match top {
        None => bottom.rank() == king,
        Some(top) => top.colour() != bottom.colour() && bottom.rank().is_one_below(top.rank()),
    }
}

/// Turn a face-down top card face up; true if a card was turned
pub(super) fn reveal_top(cards: &mut [Card]) -> bool {
    match cards.last_mut() {
        Some(top) if !top.is_face_up() => {
            top.flip(true);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;
    use crate::piles::{PileId, PileKind};

    fn up(rank: u8, suit: Suit) -> Card {
        Card::face_up(Rank::new(rank), suit)
    }

    fn down(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::new(rank), suit)
    }

    fn pile_with(cards: &[Card]) -> (Pile, Layout) {
        let layout = Layout::default();
        let mut pile = Pile::new(PileId::Tableau(0), PileKind::Tableau { king: Rank::KING });
        for &c in cards {
            pile.push(c);
        }
        pile.set_anchor(Rect::new(100, 50, 51, 69), &layout);
        (pile, layout)
    }

    #[test]
    fn test_click_rect_skips_face_down_cards() {
        let layout = Layout::default();
        let anchor = Rect::new(100, 50, 51, 69);
        // 2 face down, 3 face up
        let r = click_rect(anchor, 2, 5, &layout);
        assert_eq!(r, Rect::new(100, 50 + 48, 51, 69 + 48));
        assert_eq!(r.bottom(), 50 + 4 * 24 + 69);
    }

    #[test]
    fn test_grab_count_bands() {
        let layout = Layout::default();
        let bottom = 300;
        // On the top card
        assert_eq!(grab_count(bottom, 299, &layout), 1);
        assert_eq!(grab_count(bottom, bottom - 69 + 1, &layout), 1);
        // First band above the top card
        assert_eq!(grab_count(bottom, bottom - 69, &layout), 2);
        assert_eq!(grab_count(bottom, bottom - 69 - 23, &layout), 2);
        // Second band
        assert_eq!(grab_count(bottom, bottom - 69 - 24, &layout), 3);
    }

    #[test]
    fn test_pick_up_run_from_pointer() {
        let (mut pile, layout) = pile_with(&[
            down(13, Suit::Spades),
            up(9, Suit::Hearts),
            up(8, Suit::Clubs),
            up(7, Suit::Diamonds),
        ]);
        let rect = pile.click_rect();

        // Press on the 8 (second band from the bottom): lifts 8 and 7
        let pos = Point::new(rect.x + 5, rect.bottom() - layout.card.height - 10);
        let PickUp::Lot(lot) = pile.try_pick_up(pos, &layout) else {
            panic!("expected a lot");
        };
        assert_eq!(lot.len(), 2);
        assert_eq!(lot[0].rank(), Rank::new(8));
        assert_eq!(lot[1].rank(), Rank::new(7));
        assert_eq!(pile.len(), 2);
    }

    #[test]
    fn test_pick_up_never_takes_face_down_cards() {
        let (mut pile, layout) = pile_with(&[down(5, Suit::Spades), up(9, Suit::Hearts)]);
        let rect = pile.click_rect();
        // Exactly on the top edge of the region, where the band formula overshoots
        let PickUp::Lot(lot) = pile.try_pick_up(Point::new(rect.x, rect.y), &layout) else {
            panic!("expected a lot");
        };
        assert_eq!(lot.len(), 1);
        assert_eq!(pile.len(), 1);
    }

    #[test]
    fn test_face_down_area_is_outside_region() {
        let (mut pile, layout) = pile_with(&[down(5, Suit::Spades), up(9, Suit::Hearts)]);
        let pos = Point::new(110, 55);
        assert_eq!(pile.try_pick_up(pos, &layout), PickUp::Denied);
        assert_eq!(pile.len(), 2);
    }

    #[test]
    fn test_empty_pile_yields_empty() {
        let (mut pile, layout) = pile_with(&[]);
        assert_eq!(pile.try_pick_up(Point::new(110, 60), &layout), PickUp::Empty);
    }

    #[test]
    fn test_accepts() {
        let king = Rank::KING;
        let q_hearts = up(12, Suit::Hearts);
        assert!(accepts(Some(&q_hearts), &[up(11, Suit::Spades)], king));
        assert!(!accepts(Some(&q_hearts), &[up(11, Suit::Diamonds)], king));
        assert!(!accepts(Some(&q_hearts), &[up(10, Suit::Spades)], king));
        assert!(accepts(None, &[up(13, Suit::Clubs), up(12, Suit::Hearts)], king));
        assert!(!accepts(None, &[up(7, Suit::Diamonds), up(6, Suit::Spades)], king));
        assert!(!accepts(None, &[], king));
    }

    #[test]
    fn test_reduced_deck_uses_its_own_top_rank() {
        let king = Rank::new(5);
        assert!(accepts(None, &[up(5, Suit::Clubs)], king));
        assert!(!accepts(None, &[up(13, Suit::Clubs)], king));
    }

    #[test]
    fn test_valid_run() {
        assert!(is_valid_run(&[up(9, Suit::Hearts), up(8, Suit::Clubs), up(7, Suit::Diamonds)]));
        assert!(!is_valid_run(&[up(9, Suit::Hearts), up(8, Suit::Diamonds)]));
        assert!(!is_valid_run(&[up(9, Suit::Hearts), up(7, Suit::Clubs)]));
        assert!(!is_valid_run(&[down(9, Suit::Hearts), up(8, Suit::Clubs)]));
    }

    #[test]
    fn test_reveal_top() {
        let mut cards = vec![down(3, Suit::Spades), down(4, Suit::Hearts)];
        assert!(reveal_top(&mut cards));
        assert!(cards[1].is_face_up());
        assert!(!cards[0].is_face_up());
        assert!(!reveal_top(&mut cards));
        assert!(!reveal_top(&mut []));
    }
}

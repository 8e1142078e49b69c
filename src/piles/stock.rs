//! Stock rules
//!
//! The stock is never dragged from and never dropped on. Clicking it either
//! turns over the next `deal_count` cards onto the waste or, once the stock
//! is exhausted, turns the whole waste back over.

use super::Pile;

/// What a click on the stock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockClick {
    /// This many cards moved stock -> waste, face up
    Dealt(usize),
    /// This many cards moved waste -> stock, face down
    Reloaded(usize),
    /// Both stock and waste were empty
    Idle,
}

/// Handle a click on the stock
///
/// Dealing pops from the top of the stock, so the waste fan ends with the
/// last card dealt. Reloading pops from the top of the waste, which reverses
/// the fan: the first card ever dealt ends up on top of the stock again and
/// the next pass deals the same sequence.
pub fn click(stock: &mut Pile, waste: &mut Pile, deal_count: usize) -> StockClick {
    if stock.is_empty() {
        let mut moved = 0;
        while let Some(mut card) = waste.pop() {
            card.flip(false);
            stock.push(card);
            moved += 1;
        }
        if moved == 0 {
            return StockClick::Idle;
        }
        return StockClick::Reloaded(moved);
    }

    let mut moved = 0;
    for _ in 0..deal_count {
        let Some(mut card) = stock.pop() else {
            break;
        };
        card.flip(true);
        waste.push(card);
        moved += 1;
    }
    StockClick::Dealt(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, Rank, Suit};
    use crate::piles::{PileId, PileKind};

    fn piles() -> (Pile, Pile) {
        (
            Pile::new(PileId::Stock, PileKind::Stock),
            Pile::new(
                PileId::Waste,
                PileKind::Waste {
                    visible: 3,
                    dragging: false,
                },
            ),
        )
    }

    fn ranks(pile: &Pile) -> Vec<u8> {
        pile.cards().iter().map(|c| c.rank().value()).collect()
    }

    #[test]
    fn test_deal_three() {
        let (mut stock, mut waste) = piles();
        for r in 1..=5 {
            stock.push(Card::new(Rank::new(r), Suit::Clubs));
        }

        assert_eq!(click(&mut stock, &mut waste, 3), StockClick::Dealt(3));
        assert_eq!(ranks(&stock), vec![1, 2]);
        assert_eq!(ranks(&waste), vec![5, 4, 3]);
        assert!(waste.cards().iter().all(|c| c.is_face_up()));

        // Only two left: deal what there is
        assert_eq!(click(&mut stock, &mut waste, 3), StockClick::Dealt(2));
        assert!(stock.is_empty());
        assert_eq!(ranks(&waste), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_reload_reverses_fan() {
        let (mut stock, mut waste) = piles();
        for r in 1..=3 {
            waste.push(Card::face_up(Rank::new(r), Suit::Spades));
        }

        assert_eq!(click(&mut stock, &mut waste, 1), StockClick::Reloaded(3));
        assert!(waste.is_empty());
        assert_eq!(ranks(&stock), vec![3, 2, 1]);
        assert!(stock.cards().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_redeal_after_reload_repeats_sequence() {
        let (mut stock, mut waste) = piles();
        for r in 1..=4 {
            stock.push(Card::new(Rank::new(r), Suit::Hearts));
        }

        let mut first_pass = Vec::new();
        while !stock.is_empty() {
            click(&mut stock, &mut waste, 1);
            first_pass.push(waste.peek_top().unwrap().rank());
        }
        click(&mut stock, &mut waste, 1);

        let mut second_pass = Vec::new();
        while !stock.is_empty() {
            click(&mut stock, &mut waste, 1);
            second_pass.push(waste.peek_top().unwrap().rank());
        }
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_both_empty_is_idle() {
        let (mut stock, mut waste) = piles();
        assert_eq!(click(&mut stock, &mut waste, 1), StockClick::Idle);
    }
}

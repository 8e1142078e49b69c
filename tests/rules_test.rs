//! Placement rules checked against every card of a standard deck

use klondike_engine::{
    core::{Card, Colour, Rank, Suit},
    piles::{foundation, tableau},
};

fn deck() -> Vec<Card> {
    (1..=13)
        .flat_map(|r| Suit::ALL.into_iter().map(move |s| Card::face_up(Rank::new(r), s)))
        .collect()
}

/// Tableau accepts iff (empty and the lot starts with a king) or
/// (other colour and exactly one rank lower)
#[test]
fn test_tableau_accept_rule_exhaustive() {
    let cards = deck();
    for incoming in &cards {
        let lot = [*incoming];
        assert_eq!(
            tableau::accepts(None, &lot, Rank::KING),
            incoming.rank() == Rank::KING,
            "empty pile vs {incoming}"
        );

        for top in &cards {
            let expected = top.colour() != incoming.colour()
                && incoming.rank().value() + 1 == top.rank().value();
            assert_eq!(
                tableau::accepts(Some(top), &lot, Rank::KING),
                expected,
                "{incoming} onto {top}"
            );
        }
    }
}

/// Only the lot's bottom card matters to the destination
#[test]
fn test_tableau_judges_lot_by_bottom_card() {
    let top = Card::face_up(Rank::new(9), Suit::Clubs);
    let lot = [
        Card::face_up(Rank::new(8), Suit::Hearts),
        Card::face_up(Rank::new(7), Suit::Spades),
    ];
    assert!(tableau::accepts(Some(&top), &lot, Rank::KING));
    assert!(!tableau::accepts(Some(&top), &lot[1..], Rank::KING));
    assert!(!tableau::accepts(Some(&top), &[], Rank::KING));
}

#[test]
fn test_short_deck_king_is_max_rank() {
    let max = Rank::new(5);
    let five = Card::face_up(max, Suit::Diamonds);
    let king = Card::face_up(Rank::KING, Suit::Diamonds);
    assert!(tableau::accepts(None, &[five], max));
    assert!(!tableau::accepts(None, &[king], max));
}

/// Foundation accepts a single card of its suit, one above the top (an ace
/// when empty)
#[test]
fn test_foundation_accept_rule_exhaustive() {
    let cards = deck();
    for suit in Suit::ALL {
        for incoming in &cards {
            assert_eq!(
                foundation::accepts(None, &[*incoming], suit),
                incoming.suit() == suit && incoming.rank() == Rank::ACE,
                "empty {suit:?} foundation vs {incoming}"
            );

            for top in cards.iter().filter(|c| c.suit() == suit) {
                let expected = incoming.suit() == suit
                    && incoming.rank().value() == top.rank().value() + 1;
                assert_eq!(foundation::accepts(Some(top), &[*incoming], suit), expected);
            }
        }
    }
}

#[test]
fn test_foundation_rejects_multi_card_lots() {
    let ace = Card::face_up(Rank::ACE, Suit::Hearts);
    let two = Card::face_up(Rank::new(2), Suit::Hearts);
    assert!(!foundation::accepts(None, &[ace, two], Suit::Hearts));
}

#[test]
fn test_colour_follows_suit() {
    assert_eq!(Suit::Hearts.colour(), Colour::Red);
    assert_eq!(Suit::Diamonds.colour(), Colour::Red);
    assert_eq!(Suit::Spades.colour(), Colour::Black);
    assert_eq!(Suit::Clubs.colour(), Colour::Black);

    let mut card = Card::new(Rank::new(3), Suit::Hearts);
    card.flip(true);
    assert_eq!(card.colour(), Colour::Red);
}

#[test]
fn test_valid_runs() {
    let run = [
        Card::face_up(Rank::new(10), Suit::Spades),
        Card::face_up(Rank::new(9), Suit::Hearts),
        Card::face_up(Rank::new(8), Suit::Clubs),
    ];
    assert!(tableau::is_valid_run(&run));

    let broken = [
        Card::face_up(Rank::new(10), Suit::Spades),
        Card::face_up(Rank::new(9), Suit::Clubs),
    ];
    assert!(!tableau::is_valid_run(&broken));

    let hidden = [
        Card::new(Rank::new(10), Suit::Spades),
        Card::face_up(Rank::new(9), Suit::Hearts),
    ];
    assert!(!tableau::is_valid_run(&hidden));
}

//! Card types and definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four suits, in foundation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Clubs,
    Hearts,
    Diamonds,
}

impl Suit {
    /// All suits in the order foundations are laid out
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Clubs, Suit::Hearts, Suit::Diamonds];

    pub fn colour(&self) -> Colour {
        match self {
            Suit::Hearts | Suit::Diamonds => Colour::Red,
            Suit::Spades | Suit::Clubs => Colour::Black,
        }
    }

    /// Position of this suit in [`Suit::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Suit::Spades => 0,
            Suit::Clubs => 1,
            Suit::Hearts => 2,
            Suit::Diamonds => 3,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Clubs => '♣',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Black,
}

/// Card rank, 1 (ace) up to the deck's configured maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    pub fn new(value: u8) -> Self {
        debug_assert!(
            (Self::ACE.0..=Self::KING.0).contains(&value),
            "rank {value} out of range"
        );
        Rank(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// True if `self` sits directly below `other` (e.g. a jack below a queen)
    pub fn is_one_below(&self, other: Rank) -> bool {
        self.0.checked_add(1) == Some(other.0)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{n}"),
        }
    }
}

/// A playing card
///
/// Rank and suit are fixed at construction. The only mutable state is which
/// way up the card lies; colour is always derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    face_up: bool,
}

impl Card {
    /// Create a face-down card
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_up: false,
        }
    }

    pub fn face_up(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit,
            face_up: true,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn colour(&self) -> Colour {
        self.suit.colour()
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn flip(&mut self, face_up: bool) {
        self.face_up = face_up;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.face_up {
            write!(f, "{}{}", self.rank, self.suit.symbol())
        } else {
            write!(f, "##")
        }
    }
}

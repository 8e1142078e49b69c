//! Core value types: cards, screen geometry and layout

pub mod card;
pub mod geometry;
pub mod layout;

pub use card::{Card, Colour, Rank, Suit};
pub use geometry::{Point, Rect, Size, Vec2};
pub use layout::Layout;

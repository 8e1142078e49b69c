//! Klondike solitaire engine
//!
//! Rules, undo/redo history and game orchestration for Klondike, driven by
//! pointer events and producing draw calls. No windowing, no rendering, no
//! I/O beyond loading a config file.

pub mod board;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod piles;
pub mod tournament;
pub mod undo;

pub use error::{Result, SolitaireError};

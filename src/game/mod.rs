//! Game orchestration: pointer protocol, undo/redo, win detection

pub mod autoplay;
pub mod celebration;
pub mod input;
pub mod logger;
pub mod render;
pub mod snapshot;
pub mod state;

pub use autoplay::{Move, PlayResult, RandomPlayer};
pub use celebration::{AnimatedCard, Celebration};
pub use input::{Command, Drag, KeyChord, PointerDown, PointerUp};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use render::{DrawCall, DrawList, Surface};
pub use snapshot::{compute_state_hash, BoardSnapshot, CardView, PileSnapshot};
pub use state::Solitaire;

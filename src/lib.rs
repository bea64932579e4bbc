#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod types;
pub mod rng;
pub mod deck;
pub mod session;
pub mod catalog;
pub mod score;
pub mod clock;

// Re-exports: stable minimal API surface for external callers
pub use crate::catalog::{CatalogClient, CatalogError};
pub use crate::clock::format_elapsed;
pub use crate::deck::{build_deck, Card, DeckError};
pub use crate::rng::rng_for_game;
pub use crate::score::{ScoreRecord, ScoreStore};
pub use crate::session::{
    FlipOutcome, GameSession, Phase, SessionError, MISMATCH_DELAY_MS, PAIR_COUNT,
};
pub use crate::types::CardRecord;

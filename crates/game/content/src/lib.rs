//! Hero roster data for the skirmish engine.
//!
//! Heroes are data, not code: each entry builds a [`PieceSpec`] out of
//! `skirmish-core` vectors, cooldowns and effect instances. Adding a hero
//! means adding a constructor here; the engine never changes.

pub mod heroes;

pub use heroes::{heroes_for_role, spec, HeroName};

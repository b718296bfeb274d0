//! Deterministic combat resolution for a two-team, grid-based tactics game.
//!
//! `skirmish-core` defines the canonical rules: board topology, the layered
//! life model, status conditions, ability/effect composition, and the
//! turn/team state machine. All state mutation flows through
//! [`engine::Engine`], and the presentation layer observes changes solely by
//! draining the ordered event queue; the core never calls outward, renders
//! nothing, and keeps no wall-clock.
pub mod ability;
pub mod board;
pub mod config;
pub mod direction;
pub mod effect;
pub mod engine;
pub mod events;
pub mod life;
pub mod piece;
pub mod state;
pub mod status;
pub mod team;

pub use ability::{Ability, AbilityKind, AbilitySequence};
pub use board::{Board, BoardDimensions, Cell, CellFlags, Coord};
pub use config::GameConfig;
pub use direction::{Direction, DirectionSet, Vector, VectorList};
pub use effect::{
    AoeEffect, AttachedEffect, CureEffect, DamageEffect, EffectPayload, ForceMoveEffect,
    HealEffect, HealOrDamageEffect, MultitargetEffect, PrimaryEffect, RepeatEffect,
    SecondaryEffect, SecondaryKind, StatusEffect,
};
pub use engine::{AbilityOutcome, ActionError, Engine, Target};
pub use events::{GameEvent, LifeChangeKind, ResolutionStep};
pub use life::{LifeComponent, LifeSnapshot, LifeTags, Pool, PoolKind, PoolValues};
pub use piece::{AbilityList, Piece, PieceId, PieceSpec, Role};
pub use state::{GameState, Selection, SpawnError, TurnState};
pub use status::StatusFlags;
pub use team::{Team, TeamId};

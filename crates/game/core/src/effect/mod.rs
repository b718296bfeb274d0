//! Composable combat effects.
//!
//! Effects are the building blocks of abilities. A [`PrimaryEffect`]
//! executes exactly once, immediately, when an ability is used. A
//! [`SecondaryEffect`] is attached to a target's affliction or curative
//! list and executes once per turn boundary until its duration runs out.
//!
//! # Architecture
//!
//! This module uses an **Enum + Struct hybrid** approach:
//! - Individual effect types are structs (DamageEffect, ForceMoveEffect, ...)
//! - [`PrimaryEffect`] / [`SecondaryKind`] wrap them for dispatching
//! - The variant set is closed on purpose: new heroes and abilities are
//!   data (vectors, cooldowns, effect instances), not new code types
//!
//! The AOE and multitarget wrappers re-target another effect spatially, and
//! the repeat wrapper turns any primary effect into a duration-bearing
//! secondary one, so complex abilities compose out of a handful of kinds.

mod area;
mod damage;
mod force_move;
mod heal;
mod secondary;
mod status;

pub use area::{AoeEffect, MultitargetEffect};
pub use damage::DamageEffect;
pub use force_move::ForceMoveEffect;
pub use heal::{HealEffect, HealOrDamageEffect};
pub use secondary::{AttachedEffect, RepeatEffect, SecondaryEffect, SecondaryKind};
pub use status::{CureEffect, StatusEffect};

pub(crate) use area::aoe_targets;

use crate::board::Coord;
use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;

/// An effect that executes once, immediately, on ability use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimaryEffect {
    Damage(DamageEffect),
    HealOrDamage(HealOrDamageEffect),
    ForceMove(ForceMoveEffect),
    Cure(CureEffect),
    Aoe(AoeEffect),
    Multitarget(MultitargetEffect),
}

impl PrimaryEffect {
    /// Runs the effect. A missing target makes target-bound effects silent
    /// no-ops rather than errors.
    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: Option<PieceId>,
        _target_cell: Coord,
        direction: Option<Direction>,
    ) {
        match self {
            Self::Damage(effect) => effect.execute(ctx, source, target, direction),
            Self::HealOrDamage(effect) => effect.execute(ctx, source, target, direction),
            Self::ForceMove(effect) => effect.execute(ctx, source, target, direction),
            Self::Cure(effect) => effect.execute(ctx, source, target),
            Self::Aoe(effect) => effect.execute(ctx, source, target),
            Self::Multitarget(effect) => effect.execute(ctx, source, direction),
        }
    }
}

/// Either side of the primary/secondary split, for wrappers that accept both.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectPayload {
    Primary(Box<PrimaryEffect>),
    Secondary(SecondaryEffect),
}

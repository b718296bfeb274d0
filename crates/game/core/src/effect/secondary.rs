//! Duration-bearing effects and the lists they live in.

use crate::board::Coord;
use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;

use super::heal::HealEffect;
use super::status::StatusEffect;
use super::PrimaryEffect;

/// An effect that attaches to a piece's affliction or curative list and
/// executes once per applicable turn boundary for `duration` ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondaryEffect {
    pub kind: SecondaryKind,
    /// Remaining turn-boundary executions.
    pub duration: i32,
}

impl SecondaryEffect {
    pub fn new(kind: SecondaryKind, duration: i32) -> Self {
        Self {
            kind,
            duration: duration.max(0),
        }
    }

    /// Overrides the remaining duration.
    pub fn with_duration(mut self, duration: i32) -> Self {
        self.duration = duration.max(0);
        self
    }

    /// Wraps a primary effect so it re-executes once per turn boundary.
    pub fn repeat(effect: PrimaryEffect, duration: i32) -> Self {
        Self::new(
            SecondaryKind::Repeat(RepeatEffect {
                effect: Box::new(effect),
            }),
            duration,
        )
    }
}

/// The concrete behavior of a secondary effect.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecondaryKind {
    Heal(HealEffect),
    Status(StatusEffect),
    Repeat(RepeatEffect),
}

impl SecondaryKind {
    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: PieceId,
        target_cell: Coord,
        direction: Option<Direction>,
    ) {
        match self {
            Self::Heal(effect) => effect.execute(ctx, source, target),
            Self::Status(effect) => effect.execute(ctx, source, target, direction),
            Self::Repeat(effect) => {
                effect
                    .effect
                    .execute(ctx, source, Some(target), target_cell, direction)
            }
        }
    }

    /// The status tag this effect contributes while active, if any.
    pub fn status(&self) -> Option<crate::status::StatusFlags> {
        match self {
            Self::Status(effect) => Some(effect.status),
            _ => None,
        }
    }
}

/// Turns any primary effect into a per-turn one.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatEffect {
    pub effect: Box<PrimaryEffect>,
}

/// A secondary effect sitting in some piece's list, with the piece that
/// originated it (for ultimate-charge attribution).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachedEffect {
    pub effect: SecondaryEffect,
    pub source: PieceId,
}

impl AttachedEffect {
    pub fn new(effect: SecondaryEffect, source: PieceId) -> Self {
        Self { effect, source }
    }
}

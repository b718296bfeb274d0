//! Status conditions and their removal.

use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;
use crate::status::StatusFlags;

use super::secondary::{SecondaryEffect, SecondaryKind};

/// Inflicts (or grants) a status condition, optionally dealing damage on
/// every execution.
///
/// A status effect is secondary: it re-inserts its tag each time it ticks,
/// so the tag survives exactly as long as the effect does.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    /// The single condition this effect contributes.
    pub status: StatusFlags,
    /// Damage dealt per execution; 0 for pure conditions.
    pub damage: f32,
}

impl StatusEffect {
    pub fn new(status: StatusFlags) -> Self {
        Self {
            status,
            damage: 0.0,
        }
    }

    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage;
        self
    }

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: PieceId,
        _direction: Option<Direction>,
    ) {
        if self.damage > 0.0 {
            ctx.damage(source, target, self.damage, false);
        }

        ctx.apply_status(target, self.status);
    }
}

// Standard condition presets. Durations and per-tick damage follow the
// baseline hero roster.
impl SecondaryEffect {
    pub fn status(status: StatusFlags, duration: i32) -> Self {
        Self::new(SecondaryKind::Status(StatusEffect::new(status)), duration)
    }

    pub fn poison() -> Self {
        Self::new(
            SecondaryKind::Status(StatusEffect::new(StatusFlags::POISONED).with_damage(5.0)),
            5,
        )
    }

    pub fn freeze() -> Self {
        Self::new(
            SecondaryKind::Status(StatusEffect::new(StatusFlags::FROZEN).with_damage(10.0)),
            3,
        )
    }

    pub fn burn() -> Self {
        Self::new(
            SecondaryKind::Status(StatusEffect::new(StatusFlags::BURNING).with_damage(10.0)),
            3,
        )
    }

    pub fn disable() -> Self {
        Self::status(StatusFlags::DISABLED, 3)
    }

    pub fn stun() -> Self {
        Self::status(StatusFlags::STUNNED, 3)
    }

    pub fn sleep() -> Self {
        Self::status(StatusFlags::SLEEPING, 3)
    }

    pub fn slow() -> Self {
        Self::status(StatusFlags::SLOWED, 3)
    }

    pub fn immobilize() -> Self {
        Self::status(StatusFlags::IMMOBILIZED, 3)
    }

    pub fn curse() -> Self {
        Self::status(StatusFlags::CURSED, 2)
    }

    pub fn amplify() -> Self {
        Self::status(StatusFlags::AMPLIFIED, 3)
    }

    pub fn speed() -> Self {
        Self::status(StatusFlags::SPEED, 3)
    }
}

/// Removes impairing conditions from the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CureEffect;

impl CureEffect {
    /// Conditions whose afflictions are stripped outright. Damage-over-time
    /// wrappers without a status tag survive a cure.
    pub const CURED: StatusFlags = StatusFlags::SLEEPING
        .union(StatusFlags::SLOWED)
        .union(StatusFlags::IMMOBILIZED)
        .union(StatusFlags::STUNNED)
        .union(StatusFlags::DISABLED)
        .union(StatusFlags::POISONED)
        .union(StatusFlags::FROZEN)
        .union(StatusFlags::BURNING);

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        _source: PieceId,
        target: Option<PieceId>,
    ) {
        let Some(target) = target else { return };
        ctx.cure(target, Self::CURED);
    }
}

//! Abilities: cooldown-gated, effect-composed actions.

use bitflags::bitflags;

use crate::direction::{Vector, VectorList};
use crate::effect::{PrimaryEffect, SecondaryEffect};
use crate::piece::PieceSpec;

bitflags! {
    /// Capability classification of an ability. Classifications combine:
    /// a charge is both damage and movement.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AbilityKind: u8 {
        const DAMAGE       = 1 << 0;
        const HEAL         = 1 << 1;
        const SHIELD_REGEN = 1 << 2;
        const MOVEMENT     = 1 << 3;
        const DEPLOY       = 1 << 4;
    }
}

/// Phase-one sequencing for abilities whose setup diverges from the plain
/// windup-then-execute flow. This is a data field, not a subtype: unusual
/// sequencing is configuration, and the engine interprets it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilitySequence {
    /// Windup, then effects.
    #[default]
    Standard,
    /// Effects fire without a windup (self-moves, charges).
    Immediate,
    /// Pre-execute places a new piece on the target cell.
    DeployUnit(Box<PieceSpec>),
}

/// A named, cooldown-gated action composed of effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    pub kind: AbilityKind,
    /// Reachable offsets for targeting.
    pub vectors: VectorList,
    /// Whether targeting continues past the first occupied cell.
    pub penetrates: bool,
    /// Turns the owner must wait between uses.
    pub cooldown: u32,
    /// Turns left until usable again. Decremented at the owner's own end of
    /// turn, never below zero.
    pub remaining_cooldown: u32,
    /// Ultimates are gated on a full charge meter and reset it on use.
    pub is_ultimate: bool,
    pub sequence: AbilitySequence,
    /// Executed once, in order, on use.
    pub primary_effects: Vec<PrimaryEffect>,
    /// Attached to the target's affliction/curative list on use.
    pub secondary_effects: Vec<SecondaryEffect>,
}

impl Ability {
    pub fn new(name: impl Into<String>, kind: AbilityKind) -> Self {
        Self {
            name: name.into(),
            kind,
            vectors: VectorList::new(),
            penetrates: false,
            cooldown: 0,
            remaining_cooldown: 0,
            is_ultimate: false,
            sequence: AbilitySequence::Standard,
            primary_effects: Vec::new(),
            secondary_effects: Vec::new(),
        }
    }

    pub fn with_vector(mut self, vector: Vector) -> Self {
        self.vectors.push(vector);
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn penetrating(mut self) -> Self {
        self.penetrates = true;
        self
    }

    pub fn ultimate(mut self) -> Self {
        self.is_ultimate = true;
        self
    }

    pub fn with_sequence(mut self, sequence: AbilitySequence) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn with_primary(mut self, effect: PrimaryEffect) -> Self {
        self.primary_effects.push(effect);
        self
    }

    pub fn with_secondary(mut self, effect: SecondaryEffect) -> Self {
        self.secondary_effects.push(effect);
        self
    }

    /// Usable as far as the cooldown is concerned.
    pub fn is_ready(&self) -> bool {
        self.remaining_cooldown == 0
    }
}

//! Pieces: the units on the board.

use core::fmt;

use arrayvec::ArrayVec;

use crate::ability::Ability;
use crate::board::Coord;
use crate::config::GameConfig;
use crate::direction::VectorList;
use crate::effect::AttachedEffect;
use crate::life::{LifeComponent, LifeTags};
use crate::status::StatusFlags;
use crate::team::TeamId;

/// Unique identifier for a piece. Ids are allocated by the game state and
/// never reused, so a dead piece's id stays dangling on purpose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Battlefield role of a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Tank,
    Dps,
    Healer,
    /// Spawned by deploy abilities rather than picked at roster time.
    Deployable,
}

/// Bounded ability list carried by a piece.
pub type AbilityList = ArrayVec<Ability, { GameConfig::MAX_ABILITIES }>;

/// A unit on the grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub id: PieceId,
    pub name: String,
    pub role: Role,
    pub life: LifeComponent,
    pub movement_vectors: VectorList,
    pub abilities: AbilityList,
    pub status: StatusFlags,
    /// Enemy-sourced secondary effects, ticked at the owner team's start of
    /// turn.
    pub afflictions: Vec<AttachedEffect>,
    /// Ally-sourced secondary effects, ticked at the owner team's end of
    /// turn.
    pub curatives: Vec<AttachedEffect>,
    pub team: TeamId,
    /// Where the piece currently stands.
    pub cell: Coord,
    /// Where the piece's position snaps back to and commits from.
    pub committed_cell: Coord,
    ult_charge: f32,
    max_ult_charge: f32,
}

impl Piece {
    /// Movement is gated on the impairing conditions except Slow, which only
    /// affects range. Unstoppable overrides everything.
    pub fn can_move(&self) -> bool {
        if self.status.contains(StatusFlags::UNSTOPPABLE) {
            return true;
        }

        let blocking = StatusFlags::MOVEMENT_IMPAIRING.difference(StatusFlags::SLOWED);
        (self.status & blocking).is_empty()
    }

    pub fn can_use_abilities(&self) -> bool {
        (self.status & StatusFlags::ABILITY_IMPAIRING).is_empty()
    }

    /// Tags the life math reads off this piece's current conditions.
    pub fn life_tags(&self) -> LifeTags {
        LifeTags::from_status(self.status)
    }

    pub fn ability(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }

    pub fn ult_charge(&self) -> f32 {
        self.ult_charge
    }

    pub fn max_ult_charge(&self) -> f32 {
        self.max_ult_charge
    }

    pub fn ult_percent(&self) -> f32 {
        if self.ult_charge > 0.0 {
            self.ult_charge / self.max_ult_charge * 100.0
        } else {
            0.0
        }
    }

    pub fn ult_ready(&self) -> bool {
        self.ult_charge >= self.max_ult_charge
    }

    /// An ultimate sitting on cooldown also stops passive charge gain.
    pub fn ultimate_on_cooldown(&self) -> bool {
        self.abilities
            .iter()
            .find(|ability| ability.is_ultimate)
            .is_some_and(|ability| ability.remaining_cooldown != 0)
    }

    pub(crate) fn charge_ult(&mut self, amount: f32) {
        self.ult_charge = (self.ult_charge + amount).min(self.max_ult_charge);
    }

    pub(crate) fn reset_ult_charge(&mut self) {
        self.ult_charge = 0.0;
    }

    pub(crate) fn commit_position(&mut self) {
        self.committed_cell = self.cell;
    }
}

/// Data blueprint a piece is instantiated from.
///
/// Hero definitions are specs: the content crate builds them, the state
/// spawns them. Deploy abilities carry a spec of their own.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceSpec {
    pub name: String,
    pub role: Role,
    pub health: f32,
    pub shields: f32,
    pub armor: f32,
    pub max_ult_charge: f32,
    pub movement_vectors: VectorList,
    pub abilities: Vec<Ability>,
}

impl PieceSpec {
    /// Default ultimate-charge requirement.
    pub const DEFAULT_MAX_ULT_CHARGE: f32 = 625.0;

    pub fn new(name: impl Into<String>, role: Role, health: f32, shields: f32) -> Self {
        Self {
            name: name.into(),
            role,
            health,
            shields,
            armor: 0.0,
            max_ult_charge: Self::DEFAULT_MAX_ULT_CHARGE,
            movement_vectors: VectorList::new(),
            abilities: Vec::new(),
        }
    }

    pub fn with_armor(mut self, armor: f32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_max_ult_charge(mut self, max_ult_charge: f32) -> Self {
        self.max_ult_charge = max_ult_charge;
        self
    }

    pub fn with_movement(mut self, vector: crate::direction::Vector) -> Self {
        self.movement_vectors.push(vector);
        self
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub(crate) fn instantiate(
        &self,
        id: PieceId,
        team: TeamId,
        cell: Coord,
        config: &GameConfig,
    ) -> Piece {
        let mut abilities = AbilityList::new();
        for ability in self.abilities.iter().take(GameConfig::MAX_ABILITIES) {
            abilities.push(ability.clone());
        }

        Piece {
            id,
            name: self.name.clone(),
            role: self.role,
            life: LifeComponent::new(
                self.health,
                self.shields,
                self.armor,
                config.armor_mitigation,
            ),
            movement_vectors: self.movement_vectors.clone(),
            abilities,
            status: StatusFlags::empty(),
            afflictions: Vec::new(),
            curatives: Vec::new(),
            team,
            cell,
            committed_cell: cell,
            ult_charge: 0.0,
            max_ult_charge: self.max_ult_charge.max(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::{DirectionSet, Vector};

    fn sample_piece() -> Piece {
        PieceSpec::new("Sample", Role::Dps, 100.0, 50.0)
            .with_movement(Vector::new(DirectionSet::ALL, 1))
            .instantiate(
                PieceId(0),
                TeamId::Blue,
                Coord::new(0, 0),
                &GameConfig::new(),
            )
    }

    #[test]
    fn slow_does_not_block_movement_but_stun_does() {
        let mut piece = sample_piece();
        piece.status = StatusFlags::SLOWED;
        assert!(piece.can_move());

        piece.status = StatusFlags::STUNNED;
        assert!(!piece.can_move());

        piece.status = StatusFlags::STUNNED | StatusFlags::UNSTOPPABLE;
        assert!(piece.can_move());
    }

    #[test]
    fn ability_impairment_gates_ability_use() {
        let mut piece = sample_piece();
        assert!(piece.can_use_abilities());

        piece.status = StatusFlags::FROZEN;
        assert!(!piece.can_use_abilities());

        // Immobilize impairs movement, not abilities.
        piece.status = StatusFlags::IMMOBILIZED;
        assert!(piece.can_use_abilities());
    }

    #[test]
    fn ult_charge_clamps_at_maximum_and_resets() {
        let mut piece = sample_piece();
        piece.charge_ult(1000.0);
        assert_eq!(piece.ult_charge(), piece.max_ult_charge());
        assert!(piece.ult_ready());

        piece.reset_ult_charge();
        assert_eq!(piece.ult_charge(), 0.0);
        assert_eq!(piece.ult_percent(), 0.0);
    }
}

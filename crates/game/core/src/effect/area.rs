//! Spatial wrappers: AOE and multitarget (line) propagation.

use crate::ability::AbilityKind;
use crate::board::Coord;
use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;
use crate::state::GameState;

use super::secondary::SecondaryEffect;
use super::EffectPayload;

/// Collects the pieces an AOE reaches from `center`.
///
/// The center occupant is included with no direction. Each of the eight
/// directions is walked outward up to `range` cells: the first occupied cell
/// is collected, and the walk continues past it only when the effect
/// penetrates.
pub(crate) fn aoe_targets(
    state: &GameState,
    center: Coord,
    range: u32,
    penetrates: bool,
) -> Vec<(PieceId, Option<Direction>)> {
    let mut targets = Vec::new();

    if let Some(occupant) = state.board.occupant(center) {
        targets.push((occupant, None));
    }

    for direction in <Direction as strum::IntoEnumIterator>::iter() {
        for distance in 1..=range as i32 {
            let Some(cell) = state.board.step(center, direction, distance) else {
                break;
            };

            if let Some(occupant) = state.board.occupant(cell) {
                targets.push((occupant, Some(direction)));
                if !penetrates {
                    break;
                }
            }
        }
    }

    targets
}

/// Collects every occupant along a single direction, never stopping on
/// contact.
pub(crate) fn line_targets(
    state: &GameState,
    from: Coord,
    direction: Direction,
    range: u32,
) -> Vec<PieceId> {
    let mut targets = Vec::new();

    for distance in 1..=range as i32 {
        let Some(cell) = state.board.step(from, direction, distance) else {
            break;
        };

        if let Some(occupant) = state.board.occupant(cell) {
            targets.push(occupant);
        }
    }

    targets
}

/// Applies a secondary effect to the target and every piece around it.
///
/// Sub-targets are filtered by the wrapped classification: damage-classified
/// effects afflict enemies of the source, heal-classified effects aid its
/// allies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AoeEffect {
    pub effect: SecondaryEffect,
    pub range: u32,
    pub kind: AbilityKind,
}

impl AoeEffect {
    pub fn new(effect: SecondaryEffect, range: u32, kind: AbilityKind) -> Self {
        Self {
            effect,
            range,
            kind,
        }
    }

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: Option<PieceId>,
    ) {
        let Some(target) = target else { return };
        let Some(center) = ctx.piece_cell(target) else {
            return;
        };

        for (sub_target, _) in aoe_targets(ctx.state(), center, self.range, true) {
            if self.kind.contains(AbilityKind::DAMAGE) && !ctx.same_team(source, sub_target) {
                ctx.attach(source, sub_target, self.effect.clone(), false);
            }

            if self.kind.contains(AbilityKind::HEAL) && ctx.same_team(source, sub_target) {
                ctx.attach(source, sub_target, self.effect.clone(), true);
            }
        }
    }
}

/// Applies a wrapped effect to every matching piece along the interaction
/// direction, out to `range`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultitargetEffect {
    pub payload: EffectPayload,
    pub range: u32,
    pub kind: AbilityKind,
}

impl MultitargetEffect {
    pub fn primary(effect: super::PrimaryEffect, range: u32, kind: AbilityKind) -> Self {
        Self {
            payload: EffectPayload::Primary(Box::new(effect)),
            range,
            kind,
        }
    }

    pub fn secondary(effect: SecondaryEffect, range: u32, kind: AbilityKind) -> Self {
        Self {
            payload: EffectPayload::Secondary(effect),
            range,
            kind,
        }
    }

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        direction: Option<Direction>,
    ) {
        let Some(direction) = direction else { return };
        let Some(from) = ctx.piece_cell(source) else {
            return;
        };

        for target in line_targets(ctx.state(), from, direction, self.range) {
            let is_enemy = !ctx.same_team(source, target);
            let damage_hit = self.kind.contains(AbilityKind::DAMAGE) && is_enemy;
            let heal_hit = self.kind.contains(AbilityKind::HEAL) && !is_enemy;

            if !damage_hit && !heal_hit {
                continue;
            }

            match &self.payload {
                EffectPayload::Primary(effect) => {
                    let cell = ctx.piece_cell(target);
                    if let Some(cell) = cell {
                        effect.execute(ctx, source, Some(target), cell, Some(direction));
                    }
                }
                EffectPayload::Secondary(effect) => {
                    ctx.attach(source, target, effect.clone(), heal_hit);
                }
            }
        }
    }
}

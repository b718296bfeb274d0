//! Healing effects.

use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;

use super::aoe_targets;

/// Restore life to the target, or to every ally around it in AOE mode.
///
/// Heals are secondary effects: they sit in a curative list and execute once
/// per turn boundary.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEffect {
    pub amount: f32,
    /// When set, the effect radiates from the target to this range.
    pub aoe_range: Option<u32>,
}

impl HealEffect {
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            aoe_range: None,
        }
    }

    pub fn aoe(mut self, range: u32) -> Self {
        self.aoe_range = Some(range);
        self
    }

    pub(crate) fn execute(&self, ctx: &mut EffectContext<'_>, source: PieceId, target: PieceId) {
        match self.aoe_range {
            Some(range) => {
                let Some(center) = ctx.piece_cell(target) else {
                    return;
                };

                for (sub_target, _) in aoe_targets(ctx.state(), center, range, true) {
                    if ctx.same_team(source, sub_target) {
                        ctx.heal(source, sub_target, self.amount);
                    }
                }
            }
            None => {
                ctx.heal(source, target, self.amount);
            }
        }
    }
}

/// Heals allies for double the amount, damages enemies for the base amount.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOrDamageEffect {
    pub amount: f32,
}

impl HealOrDamageEffect {
    pub fn new(amount: f32) -> Self {
        Self { amount }
    }

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: Option<PieceId>,
        _direction: Option<Direction>,
    ) {
        let Some(target) = target else { return };

        if ctx.same_team(source, target) {
            ctx.heal(source, target, self.amount * 2.0);
        } else {
            ctx.damage(source, target, self.amount, false);
        }
    }
}

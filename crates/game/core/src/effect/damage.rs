//! Direct damage.

use crate::direction::Direction;
use crate::engine::EffectContext;
use crate::piece::PieceId;

use super::aoe_targets;

/// Deal damage to the target, or to every enemy around it in AOE mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEffect {
    pub amount: f32,
    /// When set, the effect radiates from the target to this range.
    pub aoe_range: Option<u32>,
    /// In AOE mode, whether propagation continues past the first occupied
    /// cell in each direction.
    pub penetrates: bool,
    /// Bypass every pool except health ("magic damage").
    pub ignore_shields: bool,
}

impl DamageEffect {
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            aoe_range: None,
            penetrates: false,
            ignore_shields: false,
        }
    }

    pub fn aoe(mut self, range: u32) -> Self {
        self.aoe_range = Some(range);
        self
    }

    pub fn penetrating(mut self) -> Self {
        self.penetrates = true;
        self
    }

    pub fn magic(mut self) -> Self {
        self.ignore_shields = true;
        self
    }

    pub(crate) fn execute(
        &self,
        ctx: &mut EffectContext<'_>,
        source: PieceId,
        target: Option<PieceId>,
        _direction: Option<Direction>,
    ) {
        let Some(target) = target else { return };

        match self.aoe_range {
            Some(range) => {
                let Some(center) = ctx.piece_cell(target) else {
                    return;
                };

                for (sub_target, _) in aoe_targets(ctx.state(), center, range, self.penetrates) {
                    if !ctx.same_team(source, sub_target) {
                        ctx.damage(source, sub_target, self.amount, self.ignore_shields);
                    }
                }
            }
            None => {
                ctx.damage(source, target, self.amount, self.ignore_shields);
            }
        }
    }
}

//! Shared mutation context for effect execution.
//!
//! Every effect funnels its state changes through these methods, so damage
//! attribution, ultimate-charge credit, event emission and death cleanup
//! happen in exactly one place each.

use tracing::trace;

use crate::board::Coord;
use crate::effect::{AttachedEffect, SecondaryEffect};
use crate::events::{GameEvent, LifeChangeKind, ResolutionStep};
use crate::life::LifeTags;
use crate::piece::PieceId;
use crate::state::GameState;
use crate::status::StatusFlags;

pub(crate) struct EffectContext<'a> {
    state: &'a mut GameState,
}

impl<'a> EffectContext<'a> {
    pub(crate) fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &GameState {
        self.state
    }

    pub(crate) fn piece_cell(&self, piece: PieceId) -> Option<Coord> {
        self.state.piece(piece).map(|p| p.cell)
    }

    pub(crate) fn same_team(&self, a: PieceId, b: PieceId) -> bool {
        match (self.state.piece(a), self.state.piece(b)) {
            (Some(a), Some(b)) => a.team == b.team,
            _ => false,
        }
    }

    /// Applies damage to `target`, credits the instigator's ultimate meter,
    /// and removes the target if its life is exhausted. Returns the amount
    /// actually absorbed.
    pub(crate) fn damage(
        &mut self,
        source: PieceId,
        target: PieceId,
        amount: f32,
        ignore_shields: bool,
    ) -> f32 {
        let instigator_tags = self
            .state
            .piece(source)
            .map(|p| p.life_tags())
            .unwrap_or_default();

        let Some(piece) = self.state.piece_mut(target) else {
            return 0.0;
        };

        let self_tags = LifeTags::from_status(piece.status);
        let before = piece.life.snapshot();

        let actual = if ignore_shields {
            piece
                .life
                .apply_direct_damage(amount, self_tags, instigator_tags)
        } else {
            piece.life.apply_damage(amount, self_tags, instigator_tags)
        };

        let after = piece.life.snapshot();
        piece.status.insert(StatusFlags::DAMAGED);
        let dead = piece.life.total_available() <= 0.0;

        trace!(%source, %target, amount, actual, dead, "damage applied");

        self.state.push_event(GameEvent::LifeChanged {
            piece: target,
            kind: LifeChangeKind::Damage,
            before,
            after,
        });
        self.state
            .push_event(GameEvent::EffectResolved(ResolutionStep::Damage {
                source,
                target,
                amount: actual,
            }));

        let rate = self.state.config.ult_charge_per_damage;
        self.credit_ult(source, actual * rate);

        if dead {
            self.state.remove_piece(target);
        }

        actual
    }

    /// Applies healing to `target` and credits the healer's ultimate meter.
    /// Returns the amount actually restored.
    pub(crate) fn heal(&mut self, source: PieceId, target: PieceId, amount: f32) -> f32 {
        let instigator_tags = self
            .state
            .piece(source)
            .map(|p| p.life_tags())
            .unwrap_or_default();

        let Some(piece) = self.state.piece_mut(target) else {
            return 0.0;
        };

        let self_tags = LifeTags::from_status(piece.status);
        let before = piece.life.snapshot();
        let actual = piece.life.apply_heal(amount, self_tags, instigator_tags);
        let after = piece.life.snapshot();
        piece.status.insert(StatusFlags::HEALING);

        trace!(%source, %target, amount, actual, "healing applied");

        self.state.push_event(GameEvent::LifeChanged {
            piece: target,
            kind: LifeChangeKind::Heal,
            before,
            after,
        });
        self.state
            .push_event(GameEvent::EffectResolved(ResolutionStep::Heal {
                source,
                target,
                amount: actual,
            }));

        let rate = self.state.config.ult_charge_per_heal;
        self.credit_ult(source, actual * rate);

        actual
    }

    /// Ultimate charge accrues only while the instigator's ultimate is off
    /// cooldown.
    fn credit_ult(&mut self, piece: PieceId, amount: f32) {
        if amount <= 0.0 {
            return;
        }

        let eligible = self
            .state
            .piece(piece)
            .is_some_and(|p| !p.ultimate_on_cooldown());
        if !eligible {
            return;
        }

        if let Some(piece) = self.state.piece_mut(piece) {
            piece.charge_ult(amount);
        }
    }

    pub(crate) fn apply_status(&mut self, target: PieceId, status: StatusFlags) {
        let Some(piece) = self.state.piece_mut(target) else {
            return;
        };

        piece.status.insert(status);
        self.state
            .push_event(GameEvent::EffectResolved(ResolutionStep::StatusApplied {
                target,
                status,
            }));
    }

    /// Appends a secondary effect to the target's affliction or curative
    /// list, recording the originating piece for charge attribution.
    pub(crate) fn attach(
        &mut self,
        source: PieceId,
        target: PieceId,
        effect: SecondaryEffect,
        curative: bool,
    ) {
        let Some(piece) = self.state.piece_mut(target) else {
            return;
        };

        let attached = AttachedEffect::new(effect, source);
        if curative {
            piece.curatives.push(attached);
        } else {
            piece.afflictions.push(attached);
        }

        self.state
            .push_event(GameEvent::EffectResolved(ResolutionStep::EffectAttached {
                source,
                target,
                curative,
            }));
    }

    /// Clears the target's status mask and strips afflictions carrying any
    /// of the cured conditions.
    pub(crate) fn cure(&mut self, target: PieceId, cured: StatusFlags) {
        let Some(piece) = self.state.piece_mut(target) else {
            return;
        };

        piece.status = StatusFlags::empty();
        piece.afflictions.retain(|attached| {
            attached
                .effect
                .kind
                .status()
                .is_none_or(|status| !cured.intersects(status))
        });

        self.state
            .push_event(GameEvent::EffectResolved(ResolutionStep::Cured { target }));
    }

    /// Forced relocation: moves and commits the piece in one step.
    pub(crate) fn relocate(&mut self, piece: PieceId, to: Coord) {
        let Some(p) = self.state.piece(piece) else {
            return;
        };
        let from = p.cell;

        if self.state.board.occupant(from) == Some(piece) {
            self.state.board.set_occupant(from, None);
        }
        self.state.board.set_occupant(to, Some(piece));

        if let Some(p) = self.state.piece_mut(piece) {
            p.cell = to;
            p.commit_position();
        }

        self.state
            .push_event(GameEvent::EffectResolved(ResolutionStep::ForcedMove {
                piece,
                from,
                to,
            }));
    }
}

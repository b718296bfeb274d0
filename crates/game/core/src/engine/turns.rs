//! Turn transitions and per-turn effect ticking.

use tracing::debug;

use crate::events::GameEvent;
use crate::piece::PieceId;
use crate::state::GameState;
use crate::status::StatusFlags;

use super::context::EffectContext;
use super::Engine;

impl Engine<'_> {
    /// Ends the active team's turn.
    ///
    /// For every piece on the ending team: commit its position, tick its
    /// curative list, grant the flat ultimate trickle, and wind down ability
    /// cooldowns. Then the active flag flips, the new team's once-per-turn
    /// ability budget resets, and every piece on the newly active team ticks
    /// its affliction list and has Unstoppable enforced.
    pub fn end_turn(&mut self) {
        let ending = self.state.turn.active_team;
        let next = ending.opponent();
        debug!(team = %ending, turn = self.state.turn.turn_number, "ending turn");

        self.deselect();

        let members = self.state.team(ending).pieces.clone();
        for piece in members {
            self.close_out_piece(piece);
        }

        self.state.team_mut(ending).active = false;
        self.state.team_mut(next).active = true;
        self.state.team_mut(next).used_ability = false;
        self.state.turn.active_team = next;
        self.state.turn.turn_number += 1;
        self.state.board.clear_flags();

        let label = format!("{} Turn", self.state.team(next).name);
        self.state.push_event(GameEvent::TurnStarted { team: next, label });

        let members = self.state.team(next).pieces.clone();
        for piece in members {
            tick_effects(self.state, piece, false);
            resolve_unstoppable(self.state, piece);
        }
    }

    /// End-of-turn bookkeeping for one piece of the ending team.
    fn close_out_piece(&mut self, piece: PieceId) {
        if let Some(p) = self.state.piece_mut(piece) {
            p.commit_position();
        }

        tick_effects(self.state, piece, true);

        let trickle = self.state.config.ult_charge_per_turn;
        if let Some(p) = self.state.piece_mut(piece) {
            p.charge_ult(trickle);

            for ability in &mut p.abilities {
                if ability.remaining_cooldown > 0 {
                    ability.remaining_cooldown -= 1;
                }
            }
        }
    }
}

/// Runs one list of secondary effects for a piece.
///
/// The corresponding tag set is cleared first; executing effects re-insert
/// their tags, so the mask ends up as the union of still-active effects.
/// Iteration runs from the end of the list backward so in-loop removal is
/// safe, and each entry decrements, executes, and is pruned at duration 0.
pub(crate) fn tick_effects(state: &mut GameState, piece: PieceId, curative: bool) {
    let cleared = if curative {
        StatusFlags::CURATIVE
    } else {
        StatusFlags::AFFLICTIVE
    };

    let Some(p) = state.piece_mut(piece) else {
        return;
    };
    p.status.remove(cleared);

    let cell = p.cell;
    let mut effects = if curative {
        std::mem::take(&mut p.curatives)
    } else {
        std::mem::take(&mut p.afflictions)
    };

    for index in (0..effects.len()).rev() {
        effects[index].effect.duration -= 1;

        let source = effects[index].source;
        let kind = effects[index].effect.kind.clone();
        let mut ctx = EffectContext::new(state);
        kind.execute(&mut ctx, source, piece, cell, None);

        if effects[index].effect.duration <= 0 {
            effects.remove(index);
        }
    }

    // The piece may have died mid-tick, or effects may have been attached to
    // it while its list was detached; fold those back in.
    if let Some(p) = state.piece_mut(piece) {
        let list = if curative {
            &mut p.curatives
        } else {
            &mut p.afflictions
        };
        let fresh = std::mem::take(list);
        effects.extend(fresh);
        *list = effects;
    }
}

/// An unstoppable piece sheds movement impairment entirely: the tags leave
/// the mask and the afflictions that carry them leave the list, which also
/// clears any ability impairment bundled into stun-class conditions.
pub(crate) fn resolve_unstoppable(state: &mut GameState, piece: PieceId) {
    let Some(p) = state.piece_mut(piece) else {
        return;
    };
    if !p.status.contains(StatusFlags::UNSTOPPABLE) {
        return;
    }

    p.status.remove(StatusFlags::MOVEMENT_IMPAIRING);
    p.afflictions.retain(|attached| {
        attached
            .effect
            .kind
            .status()
            .is_none_or(|status| !StatusFlags::MOVEMENT_IMPAIRING.intersects(status))
    });
}

//! Intent handling and the ability execution pipeline.
//!
//! The [`Engine`] is the authoritative mutator for [`GameState`]: the
//! presentation layer feeds it player intents (select, move, use ability,
//! end turn) and drains the resulting event queue. Refusals happen before
//! any mutation (a returned error means nothing changed), while invalid
//! targets resolve to a silent [`AbilityOutcome::NoTarget`].

mod context;
mod errors;
mod targeting;
mod turns;

pub use errors::ActionError;

pub(crate) use context::EffectContext;

use std::collections::BTreeMap;

use tracing::debug;

use crate::ability::{AbilityKind, AbilitySequence};
use crate::board::{CellFlags, Coord};
use crate::direction::Direction;
use crate::events::{GameEvent, ResolutionStep};
use crate::piece::PieceId;
use crate::state::GameState;

/// What an ability is aimed at: a piece, or a bare cell (deploys).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Piece(PieceId),
    Cell(Coord),
}

/// Result of a (permitted) ability use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityOutcome {
    /// The ability ran to completion.
    Executed,
    /// The target was missing or illegal; nothing happened.
    NoTarget,
}

/// Synchronous combat engine over one mutable game state.
pub struct Engine<'a> {
    pub(crate) state: &'a mut GameState,
}

impl<'a> Engine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Hands the accumulated events to the presentation layer.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Selects a piece of the active team and lights up its movement range.
    pub fn select_piece(&mut self, piece: PieceId) -> Result<(), ActionError> {
        let p = self.state.piece(piece).ok_or(ActionError::PieceNotFound)?;
        if p.team != self.state.turn.active_team {
            return Err(ActionError::NotActiveTeam);
        }

        self.deselect();
        self.state.selection.piece = Some(piece);
        self.state.push_event(GameEvent::PieceSelected { piece });

        for cell in targeting::movement_range(self.state, piece) {
            self.state.board.insert_flags(cell, CellFlags::TRAVERSABLE);
        }

        Ok(())
    }

    /// Clears selection state and every highlight flag.
    pub fn deselect(&mut self) {
        self.state.board.clear_flags();

        if let Some(piece) = self.state.selection.piece.take() {
            if let Some(ability) = self.state.selection.ability.take() {
                self.state
                    .push_event(GameEvent::AbilityDeselected { piece, ability });
            }
            self.state.push_event(GameEvent::PieceDeselected { piece });
        }
        self.state.selection = Default::default();
    }

    /// Selects one of a piece's abilities and lights up its legal targets.
    pub fn select_ability(&mut self, piece: PieceId, ability: usize) -> Result<(), ActionError> {
        self.validate_ability_use(piece, ability)?;

        if self.state.selection.piece != Some(piece) {
            self.select_piece(piece)?;
        } else if let Some(previous) = self.state.selection.ability.take() {
            self.state
                .push_event(GameEvent::AbilityDeselected { piece, ability: previous });
        }
        self.state.board.clear_flags();
        self.state.selection.ability = Some(ability);
        self.state
            .push_event(GameEvent::AbilitySelected { piece, ability });

        for (cell, flags) in self.ability_targets(piece, ability) {
            self.state.board.insert_flags(cell, flags);
        }

        Ok(())
    }

    /// The cells an ability can currently affect, with their target flags.
    pub fn ability_targets(&self, piece: PieceId, ability: usize) -> BTreeMap<Coord, CellFlags> {
        let Some(ability) = self
            .state
            .piece(piece)
            .and_then(|p| p.ability(ability).cloned())
        else {
            return BTreeMap::new();
        };

        targeting::ability_targets(self.state, piece, &ability)
    }

    /// The cells a piece may move to this turn.
    pub fn movement_targets(&self, piece: PieceId) -> Vec<Coord> {
        targeting::movement_range(self.state, piece)
    }

    /// Uses the currently selected piece/ability pair on a target.
    pub fn use_selected(&mut self, target: Target) -> Result<AbilityOutcome, ActionError> {
        let (Some(piece), Some(ability)) =
            (self.state.selection.piece, self.state.selection.ability)
        else {
            return Err(ActionError::AbilityNotFound);
        };

        self.use_ability(piece, ability, target)
    }

    /// Runs one ability use through its three phases.
    ///
    /// Refusals (cooldown, impairment, once-per-turn budget, ultimate not
    /// charged) are decided before any mutation. An illegal or missing
    /// target is a silent no-op.
    pub fn use_ability(
        &mut self,
        source: PieceId,
        ability_index: usize,
        target: Target,
    ) -> Result<AbilityOutcome, ActionError> {
        self.validate_ability_use(source, ability_index)?;

        let source_piece = self.state.piece(source).ok_or(ActionError::PieceNotFound)?;
        let source_cell = source_piece.cell;
        let source_team = source_piece.team;
        let ability = source_piece
            .ability(ability_index)
            .cloned()
            .ok_or(ActionError::AbilityNotFound)?;

        // Resolve the aim point. The highlight rule doubles as the validity
        // rule, so presentation and engine can never disagree on legality.
        let (target_piece, target_cell) = match target {
            Target::Piece(id) => match self.state.piece(id) {
                Some(p) => (Some(id), p.cell),
                None => return Ok(AbilityOutcome::NoTarget),
            },
            Target::Cell(cell) => {
                if !self.state.board.dimensions().contains(cell) {
                    return Ok(AbilityOutcome::NoTarget);
                }
                (self.state.board.occupant(cell), cell)
            }
        };

        let flags = targeting::ability_targets(self.state, source, &ability)
            .get(&target_cell)
            .copied()
            .unwrap_or_default();

        let legal = if ability.kind.contains(AbilityKind::DEPLOY) {
            target_piece.is_none() && flags.contains(CellFlags::DEPLOYABLE)
        } else {
            target_piece.is_some()
                && flags.intersects(CellFlags::ENEMY_TARGET | CellFlags::FRIENDLY_TARGET)
        };
        if !legal {
            return Ok(AbilityOutcome::NoTarget);
        }

        let direction = Direction::between(source_cell, target_cell);
        debug!(
            %source,
            ability = %ability.name,
            ?target,
            ?direction,
            "executing ability"
        );

        self.state.team_mut(source_team).used_ability = true;
        self.state.push_event(GameEvent::AbilityUsed {
            piece: source,
            ability: ability_index,
        });

        // Pre-execute: source-side setup. Deploy abilities place their unit
        // before any effect runs.
        if let AbilitySequence::DeployUnit(spec) = &ability.sequence {
            if let Ok(deployed) = self.state.spawn(spec, source_team, target_cell) {
                self.state
                    .push_event(GameEvent::EffectResolved(ResolutionStep::Deployed {
                        source,
                        piece: deployed,
                        cell: target_cell,
                    }));
            }
        }

        // Execute: cooldown is set one above its nominal value because it is
        // decremented at the owner's own end of turn; the ability becomes
        // usable again only after the declared number of enemy turns.
        if let Some(p) = self.state.piece_mut(source) {
            if let Some(a) = p.abilities.get_mut(ability_index) {
                a.remaining_cooldown = ability.cooldown + 1;
            }
        }

        let mut ctx = EffectContext::new(self.state);
        for effect in &ability.primary_effects {
            effect.execute(&mut ctx, source, target_piece, target_cell, direction);
        }

        if let Some(target_piece) = target_piece {
            for effect in &ability.secondary_effects {
                // Heals aimed at a teammate are buffs; everything else is an
                // affliction, including self-inflicted DoT.
                let curative = ability.kind.contains(AbilityKind::HEAL)
                    && ctx.same_team(source, target_piece);
                ctx.attach(source, target_piece, effect.clone(), curative);
            }
        }

        // Post-execute: ultimates burn their charge; the completed use is
        // the synchronous point an external sequencer can key off.
        if ability.is_ultimate {
            if let Some(p) = self.state.piece_mut(source) {
                p.reset_ult_charge();
            }
        }

        self.deselect();
        Ok(AbilityOutcome::Executed)
    }

    /// Tentatively moves a piece of the active team. Positions commit at end
    /// of turn; until then the move can be reverted with
    /// [`Engine::reset_position`].
    pub fn move_piece(&mut self, piece: PieceId, destination: Coord) -> Result<(), ActionError> {
        let p = self.state.piece(piece).ok_or(ActionError::PieceNotFound)?;
        if p.team != self.state.turn.active_team {
            return Err(ActionError::NotActiveTeam);
        }
        if !p.can_move() {
            return Err(ActionError::MovementImpaired);
        }

        let from = p.cell;
        if !targeting::movement_range(self.state, piece).contains(&destination) {
            return Err(ActionError::InvalidDestination);
        }
        if destination == from {
            return Ok(());
        }

        if self.state.board.occupant(from) == Some(piece) {
            self.state.board.set_occupant(from, None);
        }
        self.state.board.set_occupant(destination, Some(piece));
        if let Some(p) = self.state.piece_mut(piece) {
            p.cell = destination;
        }

        self.state.push_event(GameEvent::PieceMoved {
            piece,
            from,
            to: destination,
        });

        Ok(())
    }

    /// Snaps a piece back to its committed cell (a cancelled move).
    pub fn reset_position(&mut self, piece: PieceId) -> Result<(), ActionError> {
        let p = self.state.piece(piece).ok_or(ActionError::PieceNotFound)?;
        let from = p.cell;
        let committed = p.committed_cell;

        if from == committed {
            return Ok(());
        }
        if self
            .state
            .board
            .occupant(committed)
            .is_some_and(|occupant| occupant != piece)
        {
            return Ok(());
        }

        if self.state.board.occupant(from) == Some(piece) {
            self.state.board.set_occupant(from, None);
        }
        self.state.board.set_occupant(committed, Some(piece));
        if let Some(p) = self.state.piece_mut(piece) {
            p.cell = committed;
        }

        self.state.push_event(GameEvent::PieceMoved {
            piece,
            from,
            to: committed,
        });

        Ok(())
    }

    /// All preconditions for an ability use, checked without mutating.
    fn validate_ability_use(&self, piece: PieceId, ability: usize) -> Result<(), ActionError> {
        let p = self.state.piece(piece).ok_or(ActionError::PieceNotFound)?;
        if p.team != self.state.turn.active_team {
            return Err(ActionError::NotActiveTeam);
        }

        let a = p.ability(ability).ok_or(ActionError::AbilityNotFound)?;
        if !p.can_use_abilities() {
            return Err(ActionError::AbilityImpaired);
        }
        if a.kind.contains(AbilityKind::MOVEMENT)
            && p.status.contains(crate::status::StatusFlags::IMMOBILIZED)
        {
            return Err(ActionError::MovementImpaired);
        }
        if !a.is_ready() {
            return Err(ActionError::OnCooldown);
        }
        if self.state.team(p.team).used_ability {
            return Err(ActionError::AbilityAlreadyUsed);
        }
        if a.is_ultimate && !p.ult_ready() {
            return Err(ActionError::UltimateNotCharged);
        }

        Ok(())
    }
}

//! Aggregate game state.
//!
//! One [`GameState`] value holds everything the engine mutates: board
//! occupancy, the piece arena, both teams, turn bookkeeping, selection and
//! the outbound event queue. All mutation flows through
//! [`crate::engine::Engine`]; the state type itself only offers storage-level
//! operations (spawn, remove, lookups) that keep board/team/piece agreement.

use std::collections::BTreeMap;

use tracing::debug;

use crate::board::{Board, BoardDimensions, Coord};
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::piece::{Piece, PieceId, PieceSpec};
use crate::team::{Team, TeamId};

/// Turn bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub active_team: TeamId,
    /// Counts completed turn transitions, starting at 1.
    pub turn_number: u32,
}

/// Which piece/ability the acting player currently has selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub piece: Option<PieceId>,
    pub ability: Option<usize>,
}

/// Errors raised when placing a piece on the board.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpawnError {
    #[error("cell is outside the board")]
    OutOfBounds,
    #[error("cell is already occupied")]
    Occupied,
}

/// The complete, serializable simulation state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    pieces: BTreeMap<PieceId, Piece>,
    teams: [Team; 2],
    pub turn: TurnState,
    pub selection: Selection,
    pub(crate) events: Vec<GameEvent>,
    next_piece_id: u32,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(BoardDimensions::new(config.rows, config.cols));

        Self {
            config,
            board,
            pieces: BTreeMap::new(),
            teams: [
                Team::new(TeamId::Blue, "Blue", true),
                Team::new(TeamId::Red, "Red", false),
            ],
            turn: TurnState {
                active_team: TeamId::Blue,
                turn_number: 1,
            },
            selection: Selection::default(),
            events: Vec::new(),
            next_piece_id: 0,
        }
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    pub(crate) fn team_mut(&mut self, id: TeamId) -> &mut Team {
        &mut self.teams[id.index()]
    }

    pub fn active_team(&self) -> &Team {
        self.team(self.turn.active_team)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.get_mut(&id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Instantiates a spec onto the board and registers it with its team.
    pub fn spawn(
        &mut self,
        spec: &PieceSpec,
        team: TeamId,
        cell: Coord,
    ) -> Result<PieceId, SpawnError> {
        if !self.board.dimensions().contains(cell) {
            return Err(SpawnError::OutOfBounds);
        }
        if self.board.occupant(cell).is_some() {
            return Err(SpawnError::Occupied);
        }

        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;

        let piece = spec.instantiate(id, team, cell, &self.config);
        debug!(piece = %id, name = %piece.name, %team, %cell, "spawning piece");

        self.board.set_occupant(cell, Some(id));
        self.team_mut(team).add(id);
        self.pieces.insert(id, piece);

        Ok(id)
    }

    /// Removes a dead piece from the board, its team, and the arena.
    pub(crate) fn remove_piece(&mut self, id: PieceId) {
        let Some(piece) = self.pieces.remove(&id) else {
            return;
        };

        debug!(piece = %id, name = %piece.name, "removing piece");

        if self.board.occupant(piece.cell) == Some(id) {
            self.board.set_occupant(piece.cell, None);
        }
        self.team_mut(piece.team).remove(id);

        if self.selection.piece == Some(id) {
            self.selection = Selection::default();
        }

        self.push_event(GameEvent::PieceRemoved { piece: id });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hands the accumulated events to the caller, emptying the queue.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

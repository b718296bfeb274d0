//! Events emitted toward the presentation layer.
//!
//! The core never calls outward. Every observable change is pushed onto an
//! ordered queue inside the game state; the presentation layer drains the
//! queue after each intent and replays it at its own pace (animations,
//! health bars, turn banners). Per ability use, the queue holds the full
//! resolution trace in execution order, and that ordering is the contract.

use crate::board::Coord;
use crate::life::LifeSnapshot;
use crate::piece::PieceId;
use crate::status::StatusFlags;
use crate::team::TeamId;

/// Whether a life change was inflicted or restorative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifeChangeKind {
    Damage,
    Heal,
}

/// One entry of the ordered resolution trace of an ability use (or a turn
/// boundary's effect ticking).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolutionStep {
    Damage {
        source: PieceId,
        target: PieceId,
        amount: f32,
    },
    Heal {
        source: PieceId,
        target: PieceId,
        amount: f32,
    },
    StatusApplied {
        target: PieceId,
        status: StatusFlags,
    },
    Cured {
        target: PieceId,
    },
    EffectAttached {
        source: PieceId,
        target: PieceId,
        curative: bool,
    },
    ForcedMove {
        piece: PieceId,
        from: Coord,
        to: Coord,
    },
    Deployed {
        source: PieceId,
        piece: PieceId,
        cell: Coord,
    },
}

/// Everything the presentation layer can observe.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    PieceSelected {
        piece: PieceId,
    },
    PieceDeselected {
        piece: PieceId,
    },
    /// A player-initiated (tentative) move.
    PieceMoved {
        piece: PieceId,
        from: Coord,
        to: Coord,
    },
    AbilitySelected {
        piece: PieceId,
        ability: usize,
    },
    AbilityDeselected {
        piece: PieceId,
        ability: usize,
    },
    AbilityUsed {
        piece: PieceId,
        ability: usize,
    },
    TurnStarted {
        team: TeamId,
        /// Display label, e.g. "Blue Turn".
        label: String,
    },
    /// Old/new per-pool values so health bars can animate deltas.
    LifeChanged {
        piece: PieceId,
        kind: LifeChangeKind,
        before: LifeSnapshot,
        after: LifeSnapshot,
    },
    /// The piece's total available life reached zero and it left the board.
    PieceRemoved {
        piece: PieceId,
    },
    EffectResolved(ResolutionStep),
}

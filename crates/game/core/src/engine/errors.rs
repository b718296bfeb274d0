//! Engine refusal errors.
//!
//! These cover state-machine misuse only: a refused intent has mutated
//! nothing. Invalid *targets* are not errors: the engine answers them with
//! a silent no-op, because the targeting rule that highlights legal cells is
//! the same rule that validates them.

/// Reasons an intent is refused before any mutation occurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// No piece with that id is alive.
    #[error("piece not found")]
    PieceNotFound,

    /// The ability index is out of range for the piece.
    #[error("ability not found")]
    AbilityNotFound,

    /// The piece does not belong to the team whose turn it is.
    #[error("not the active team")]
    NotActiveTeam,

    /// An ability-impairing condition is active on the piece.
    #[error("piece is ability impaired")]
    AbilityImpaired,

    /// A movement-impairing condition blocks this action.
    #[error("piece is movement impaired")]
    MovementImpaired,

    /// The ability's cooldown has not elapsed.
    #[error("ability is on cooldown")]
    OnCooldown,

    /// The team already used an ability this turn.
    #[error("team already used an ability this turn")]
    AbilityAlreadyUsed,

    /// The ultimate meter is not full.
    #[error("ultimate is not fully charged")]
    UltimateNotCharged,

    /// The destination is not reachable for this piece right now.
    #[error("destination is not reachable")]
    InvalidDestination,
}

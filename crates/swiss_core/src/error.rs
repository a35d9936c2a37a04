//! Error taxonomy for the tournament engine.
//!
//! Only conditions that actually abort something are `Err` values here.
//! The two resolvable conditions are encoded in data instead: a move
//! timeout becomes `ContestOutcome::Incomplete`, and a roster with no
//! valid pairing becomes an all-bye round.

use thiserror::Error;

/// Failure of a collaborator-provided channel (prompt delivery or
/// broadcast). Terminal for the match it occurred in; sibling matches in
/// the same round are unaffected.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// Engine-level failures.
#[derive(Debug, Error)]
pub enum TournamentError {
    /// A channel failure that escaped one match. The controller converts
    /// this into a forfeit for that match only.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// A round failed structural validation. Fatal for the tournament:
    /// standings can no longer be trusted, so the controller aborts.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

//! Collaborator-facing channel traits.
//!
//! The engine never talks to a transport directly. It consumes exactly
//! two capabilities: deliver a prompt to one participant and wait for
//! their move, and broadcast outcome text. Transports (a chat bot, a
//! test script, a random simulator) implement these traits.

use crate::error::ChannelError;
use crate::types::{Move, ParticipantId};
use async_trait::async_trait;
use std::time::Duration;

/// Who a broadcast message is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnnounceScope {
    /// Everyone following the tournament.
    Tournament,
    /// The two sides of one pairing.
    Pairing(ParticipantId, ParticipantId),
}

/// Delivers a prompt to a participant and returns their chosen move.
///
/// Implementations must support concurrent outstanding requests to
/// different participants; both sides of a duel are asked at once. The
/// engine enforces `deadline` itself, so an implementation that never
/// answers simply times the duel out.
#[async_trait]
pub trait MoveProvider: Send + Sync {
    async fn request_move(
        &self,
        participant: ParticipantId,
        prompt: &str,
        deadline: Duration,
    ) -> Result<Move, ChannelError>;
}

/// Fire-and-forget broadcast of round/match/duel outcome text.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, scope: AnnounceScope, text: &str) -> Result<(), ChannelError>;
}

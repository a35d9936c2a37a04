//! Channel implementations for tests and the demo binary.
//!
//! Real deployments wire the engine to a chat transport; these stand-ins
//! answer from a script, at random, never, or not at all.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use swiss_core::{AnnounceScope, Announcer, ChannelError, Move, MoveProvider, ParticipantId};
use tracing::info;

/// Answers each participant from a pre-loaded move queue. A participant
/// whose queue is empty never answers, which exercises the timeout path.
#[derive(Default)]
pub struct ScriptedProvider {
    scripts: Mutex<HashMap<ParticipantId, VecDeque<Move>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue moves for one participant, appended in play order.
    pub fn script(&self, participant: ParticipantId, moves: Vec<Move>) {
        self.scripts
            .lock()
            .expect("scripts lock")
            .entry(participant)
            .or_default()
            .extend(moves);
    }
}

#[async_trait]
impl MoveProvider for ScriptedProvider {
    async fn request_move(
        &self,
        participant: ParticipantId,
        _prompt: &str,
        _deadline: Duration,
    ) -> Result<Move, ChannelError> {
        let next = self
            .scripts
            .lock()
            .expect("scripts lock")
            .get_mut(&participant)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(mv) => Ok(mv),
            // Out of scripted moves: stay silent until the engine's
            // deadline fires.
            None => std::future::pending::<Result<Move, ChannelError>>().await,
        }
    }
}

/// Picks a uniformly random move, like a participant mashing buttons.
pub struct RandomProvider;

#[async_trait]
impl MoveProvider for RandomProvider {
    async fn request_move(
        &self,
        _participant: ParticipantId,
        _prompt: &str,
        _deadline: Duration,
    ) -> Result<Move, ChannelError> {
        let mv = *Move::ALL
            .choose(&mut rand::thread_rng())
            .expect("non-empty move set");
        Ok(mv)
    }
}

/// Always fails, simulating an unreachable transport.
pub struct FailingProvider;

#[async_trait]
impl MoveProvider for FailingProvider {
    async fn request_move(
        &self,
        participant: ParticipantId,
        _prompt: &str,
        _deadline: Duration,
    ) -> Result<Move, ChannelError> {
        Err(ChannelError::Unavailable(format!(
            "no route to participant {participant}"
        )))
    }
}

/// Collects announcements in memory for assertions.
#[derive(Default)]
pub struct BufferAnnouncer {
    messages: Mutex<Vec<String>>,
}

impl BufferAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("messages lock").clone()
    }
}

#[async_trait]
impl Announcer for BufferAnnouncer {
    async fn announce(&self, _scope: AnnounceScope, text: &str) -> Result<(), ChannelError> {
        self.messages
            .lock()
            .expect("messages lock")
            .push(text.to_string());
        Ok(())
    }
}

/// Forwards announcements to the tracing subscriber; used by the demo
/// binary.
pub struct LogAnnouncer;

#[async_trait]
impl Announcer for LogAnnouncer {
    async fn announce(&self, scope: AnnounceScope, text: &str) -> Result<(), ChannelError> {
        match scope {
            AnnounceScope::Tournament => info!("{text}"),
            AnnounceScope::Pairing(a, b) => info!(pairing = %format!("{a} vs {b}"), "{text}"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_moves_come_back_in_order() {
        let provider = ScriptedProvider::new();
        let id = ParticipantId(1);
        provider.script(id, vec![Move::Swift, Move::Forceful]);

        let deadline = Duration::from_secs(1);
        assert_eq!(
            provider.request_move(id, "", deadline).await.unwrap(),
            Move::Swift
        );
        assert_eq!(
            provider.request_move(id, "", deadline).await.unwrap(),
            Move::Forceful
        );
    }

    #[tokio::test]
    async fn buffer_announcer_records_text() {
        let announcer = BufferAnnouncer::new();
        announcer
            .announce(AnnounceScope::Tournament, "round 1 begins")
            .await
            .unwrap();
        assert_eq!(announcer.messages(), vec!["round 1 begins".to_string()]);
    }
}

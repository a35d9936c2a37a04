//! Single-duel resolution: collect both moves concurrently, apply the
//! dominance rule, announce the outcome.

use std::sync::Arc;
use std::time::Duration;

use swiss_core::{
    AnnounceScope, Announcer, ChannelError, Contest, ContestOutcome, Move, MoveProvider,
    Participant, TournamentError,
};
use tokio::time::timeout;
use tracing::warn;

/// Resolves one duel between the two sides of a pairing.
#[derive(Clone)]
pub struct ContestResolver {
    provider: Arc<dyn MoveProvider>,
    announcer: Arc<dyn Announcer>,
    deadline: Duration,
}

impl ContestResolver {
    pub fn new(
        provider: Arc<dyn MoveProvider>,
        announcer: Arc<dyn Announcer>,
        deadline: Duration,
    ) -> Self {
        Self {
            provider,
            announcer,
            deadline,
        }
    }

    /// Run one duel. Both move requests are issued before either is
    /// awaited; a slow side never blocks the other. A side that misses
    /// the deadline leaves the duel `Incomplete`, which scores as a
    /// draw. A channel failure aborts the enclosing match.
    pub async fn run_contest(
        &self,
        a: &Participant,
        b: &Participant,
        prompt: &str,
    ) -> Result<Contest, TournamentError> {
        let request_a = timeout(
            self.deadline,
            self.provider.request_move(a.id, prompt, self.deadline),
        );
        let request_b = timeout(
            self.deadline,
            self.provider.request_move(b.id, prompt, self.deadline),
        );
        let (reply_a, reply_b) = tokio::join!(request_a, request_b);

        let move_a = Self::unpack(reply_a, &a.name)?;
        let move_b = Self::unpack(reply_b, &b.name)?;

        let outcome = match (move_a, move_b) {
            (Some(ma), Some(mb)) => ma.duel(mb),
            _ => ContestOutcome::Incomplete,
        };
        let contest = Contest {
            move_a,
            move_b,
            outcome,
        };

        let scope = AnnounceScope::Pairing(a.id, b.id);
        let text = Self::describe(&contest, a, b);
        self.announcer.announce(scope, &text).await?;
        Ok(contest)
    }

    /// Flatten a timed move request: elapsed deadline becomes `None`,
    /// a channel failure propagates.
    fn unpack(
        reply: Result<Result<Move, ChannelError>, tokio::time::error::Elapsed>,
        name: &str,
    ) -> Result<Option<Move>, TournamentError> {
        match reply {
            Ok(Ok(mv)) => Ok(Some(mv)),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => {
                warn!(participant = name, "move request timed out");
                Ok(None)
            }
        }
    }

    fn describe(contest: &Contest, a: &Participant, b: &Participant) -> String {
        match (contest.outcome, contest.move_a, contest.move_b) {
            (ContestOutcome::WinnerA, Some(ma), Some(mb)) => {
                format!("{} wins the duel: {} beats {}", a.name, ma, mb)
            }
            (ContestOutcome::WinnerB, Some(ma), Some(mb)) => {
                format!("{} wins the duel: {} beats {}", b.name, mb, ma)
            }
            (ContestOutcome::Draw, Some(mv), _) => {
                format!("Duel drawn: both picked {mv}")
            }
            _ => {
                let mut silent = Vec::new();
                if contest.move_a.is_none() {
                    silent.push(a.name.as_str());
                }
                if contest.move_b.is_none() {
                    silent.push(b.name.as_str());
                }
                format!("No result: {} did not respond in time", silent.join(" and "))
            }
        }
    }
}

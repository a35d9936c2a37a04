//! Tournament controller: drives pairing, matches and settlement round
//! by round.

use std::sync::Arc;

use swiss_core::{
    AnnounceScope, Announcer, MatchResult, MoveProvider, Participant, ParticipantId,
    ParticipantState, TournamentConfig, TournamentError,
};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::match_runner::MatchRunner;
use crate::pairing::{PairingEngine, PairingStrategy};
use crate::results::{RoundRecord, TournamentReport};
use crate::standings::StandingsTracker;

/// Lifecycle of one tournament run. `Completed` and `Aborted` are
/// terminal; no round is ever skipped or rerun.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    RoundInProgress(u32),
    Completed,
    Aborted,
}

/// Owns the roster state for one tournament and runs it to completion.
///
/// Within a round all matches run concurrently; they read point values
/// fixed at round start and never observe mid-round mutation, because
/// settlement happens only after the slowest match has finished.
pub struct TournamentController {
    config: TournamentConfig,
    participants: Vec<Participant>,
    provider: Arc<dyn MoveProvider>,
    announcer: Arc<dyn Announcer>,
    pairing: Box<dyn PairingStrategy>,
    tracker: StandingsTracker,
    phase: Phase,
    rounds: Vec<RoundRecord>,
}

impl TournamentController {
    pub fn new(
        config: TournamentConfig,
        participants: Vec<Participant>,
        provider: Arc<dyn MoveProvider>,
        announcer: Arc<dyn Announcer>,
    ) -> Self {
        Self::with_pairing_strategy(
            config,
            participants,
            provider,
            announcer,
            Box::new(PairingEngine::default()),
        )
    }

    /// Build a controller with a custom pairing strategy.
    pub fn with_pairing_strategy(
        config: TournamentConfig,
        participants: Vec<Participant>,
        provider: Arc<dyn MoveProvider>,
        announcer: Arc<dyn Announcer>,
        pairing: Box<dyn PairingStrategy>,
    ) -> Self {
        let tracker = StandingsTracker::new(&participants);
        Self {
            config,
            participants,
            provider,
            announcer,
            pairing,
            tracker,
            phase: Phase::NotStarted,
            rounds: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Operator abort. Terminal; no points are back-filled for the
    /// interrupted round.
    pub fn abort(&mut self) {
        if !matches!(self.phase, Phase::Completed) {
            self.phase = Phase::Aborted;
        }
    }

    /// Current ranking of the roster.
    pub fn standings(&self) -> Vec<&ParticipantState> {
        self.tracker.standings()
    }

    /// Run every round and return the final report. On an invariant
    /// violation the tournament stops in `Aborted`; points already
    /// settled in earlier rounds are preserved.
    pub async fn run(&mut self) -> Result<TournamentReport, TournamentError> {
        info!(
            rounds = self.config.rounds,
            roster = self.participants.len(),
            "tournament starting"
        );
        for number in 1..=self.config.rounds {
            self.phase = Phase::RoundInProgress(number);
            match self.run_round(number).await {
                Ok(record) => self.rounds.push(record),
                Err(e) => {
                    error!(round = number, error = %e, "tournament aborted");
                    self.phase = Phase::Aborted;
                    let _ = self
                        .announcer
                        .announce(
                            AnnounceScope::Tournament,
                            &format!("Tournament aborted in round {number}: {e}"),
                        )
                        .await;
                    return Err(e);
                }
            }
        }
        self.phase = Phase::Completed;
        info!("tournament complete");
        Ok(self.report())
    }

    async fn run_round(&mut self, number: u32) -> Result<RoundRecord, TournamentError> {
        let round = self
            .pairing
            .compute_pairings(number, self.tracker.states_mut());

        let roster: Vec<ParticipantId> = self.participants.iter().map(|p| p.id).collect();
        round
            .validate(&roster)
            .map_err(TournamentError::InvariantViolation)?;

        self.announcer
            .announce(AnnounceScope::Tournament, &self.describe_round(&round))
            .await?;

        // Fan out: all matches of the round run concurrently and are
        // joined before any points move.
        let runner = MatchRunner::new(
            self.provider.clone(),
            self.announcer.clone(),
            self.config.clone(),
        );
        let mut tasks = JoinSet::new();
        for pairing in round.pairings.iter().copied() {
            let runner = runner.clone();
            let a = self.participant(pairing.a)?;
            let b = self.participant(pairing.b)?;
            tasks.spawn(async move { (pairing, runner.run_match(number, &a, &b).await) });
        }

        let mut results: Vec<MatchResult> = Vec::with_capacity(round.pairings.len());
        while let Some(joined) = tasks.join_next().await {
            let (pairing, outcome) = joined.map_err(|e| {
                TournamentError::InvariantViolation(format!("match task failed: {e}"))
            })?;
            match outcome {
                Ok(result) => results.push(result),
                // A dead channel forfeits this match only; its siblings
                // and the round settlement continue.
                Err(TournamentError::Channel(e)) => {
                    warn!(round = number, ?pairing, error = %e, "match forfeited");
                    let text = format!(
                        "Match between {} and {} could not be played: no points awarded",
                        self.name(pairing.a),
                        self.name(pairing.b)
                    );
                    if let Err(e) = self
                        .announcer
                        .announce(AnnounceScope::Tournament, &text)
                        .await
                    {
                        warn!(error = %e, "forfeit announcement failed");
                    }
                    results.push(MatchResult::forfeited(pairing));
                }
                Err(e) => return Err(e),
            }
        }
        // Join order is nondeterministic; keep the record stable.
        results.sort_by_key(|r| (r.pairing.a, r.pairing.b));

        self.tracker
            .apply_round_results(&round, &results, &self.config);
        self.announcer
            .announce(AnnounceScope::Tournament, &self.describe_standings(number))
            .await?;

        Ok(RoundRecord {
            round,
            matches: results,
        })
    }

    fn report(&self) -> TournamentReport {
        TournamentReport::new(
            &self.config,
            &self.participants,
            &self.rounds,
            &self.tracker.standings(),
        )
    }

    fn participant(&self, id: ParticipantId) -> Result<Participant, TournamentError> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| {
                TournamentError::InvariantViolation(format!("unknown participant {id} in pairing"))
            })
    }

    fn name(&self, id: ParticipantId) -> String {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    fn describe_round(&self, round: &swiss_core::Round) -> String {
        let mut lines = vec![format!("Round {} pairings:", round.number)];
        for p in &round.pairings {
            lines.push(format!("  {} vs {}", self.name(p.a), self.name(p.b)));
        }
        for &id in &round.byes {
            lines.push(format!("  {} has a bye", self.name(id)));
        }
        lines.join("\n")
    }

    fn describe_standings(&self, number: u32) -> String {
        let mut lines = vec![format!("Standings after round {number}:")];
        for state in self.tracker.standings() {
            lines.push(format!("  {}: {} pts", self.name(state.id), state.points));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{BufferAnnouncer, FailingProvider, ScriptedProvider};
    use swiss_core::{MatchVerdict, Move, Pairing, Round};

    fn pair_of_participants() -> Vec<Participant> {
        vec![Participant::new(0, "Ada"), Participant::new(1, "Brin")]
    }

    #[tokio::test]
    async fn single_round_head_to_head() {
        let participants = pair_of_participants();
        let provider = Arc::new(ScriptedProvider::new());
        provider.script(
            participants[0].id,
            vec![Move::Swift, Move::Forceful, Move::Swift],
        );
        provider.script(
            participants[1].id,
            vec![Move::Reactive, Move::Forceful, Move::Reactive],
        );

        let config = TournamentConfig {
            rounds: 1,
            ..Default::default()
        };
        let mut controller = TournamentController::new(
            config,
            participants,
            provider,
            Arc::new(BufferAnnouncer::new()),
        );
        let report = controller.run().await.unwrap();

        assert_eq!(controller.phase(), Phase::Completed);
        assert_eq!(report.standings[0].name, "Ada");
        assert_eq!(report.standings[0].points, 3);
        assert_eq!(report.standings[1].points, 0);
    }

    #[tokio::test]
    async fn dead_channel_forfeits_the_match_but_not_the_tournament() {
        let participants = pair_of_participants();
        let config = TournamentConfig {
            rounds: 1,
            ..Default::default()
        };
        let mut controller = TournamentController::new(
            config,
            participants,
            Arc::new(FailingProvider),
            Arc::new(BufferAnnouncer::new()),
        );
        let report = controller.run().await.unwrap();

        assert_eq!(controller.phase(), Phase::Completed);
        assert_eq!(report.rounds[0].matches[0].verdict, MatchVerdict::Forfeited);
        assert!(report.standings.iter().all(|row| row.points == 0));
    }

    /// Pairs normally for the first round, then emits a round that books
    /// the same participant twice.
    struct DoubleBookingStrategy {
        valid_rounds: u32,
    }

    impl PairingStrategy for DoubleBookingStrategy {
        fn compute_pairings(&self, number: u32, roster: &mut [ParticipantState]) -> Round {
            if number <= self.valid_rounds {
                return PairingEngine::default().compute_pairings(number, roster);
            }
            let pairing = Pairing::new(roster[0].id, roster[1].id);
            Round {
                number,
                pairings: vec![pairing, pairing],
                byes: vec![],
                fallback_used: false,
            }
        }
    }

    #[tokio::test]
    async fn invalid_round_aborts_and_keeps_settled_points() {
        let participants = pair_of_participants();
        let provider = Arc::new(ScriptedProvider::new());
        provider.script(
            participants[0].id,
            vec![Move::Swift, Move::Swift, Move::Swift],
        );
        provider.script(
            participants[1].id,
            vec![Move::Reactive, Move::Reactive, Move::Reactive],
        );

        let config = TournamentConfig {
            rounds: 2,
            ..Default::default()
        };
        let win_points = config.win_points;
        let announcer = Arc::new(BufferAnnouncer::new());
        let mut controller = TournamentController::with_pairing_strategy(
            config,
            participants,
            provider,
            announcer.clone(),
            Box::new(DoubleBookingStrategy { valid_rounds: 1 }),
        );

        let err = controller.run().await.unwrap_err();
        assert!(matches!(err, TournamentError::InvariantViolation(_)));
        assert_eq!(controller.phase(), Phase::Aborted);

        // Round 1 settled before the bad round; its points survive.
        let standings = controller.standings();
        assert_eq!(standings[0].points, win_points);
        assert_eq!(standings[1].points, 0);

        assert!(announcer
            .messages()
            .iter()
            .any(|m| m.contains("Tournament aborted in round 2")));
    }

    #[tokio::test]
    async fn abort_is_terminal() {
        let mut controller = TournamentController::new(
            TournamentConfig::default(),
            pair_of_participants(),
            Arc::new(ScriptedProvider::new()),
            Arc::new(BufferAnnouncer::new()),
        );
        assert_eq!(controller.phase(), Phase::NotStarted);
        controller.abort();
        assert_eq!(controller.phase(), Phase::Aborted);
    }
}

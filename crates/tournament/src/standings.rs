//! Cumulative standings: per-round point settlement and ranking.

use std::collections::HashMap;

use swiss_core::{
    MatchResult, MatchVerdict, Participant, ParticipantId, ParticipantState, Round,
    TournamentConfig,
};
use tracing::debug;

/// Holds every participant's cumulative state and applies round results.
///
/// Points move only here, and only once per round after every match has
/// finished, so no partial round is ever visible in the standings.
pub struct StandingsTracker {
    states: Vec<ParticipantState>,
    index: HashMap<ParticipantId, usize>,
}

impl StandingsTracker {
    /// One state per participant, seeded in registration order.
    pub fn new(participants: &[Participant]) -> Self {
        let states: Vec<ParticipantState> = participants
            .iter()
            .enumerate()
            .map(|(seed, p)| ParticipantState::new(p.id, seed))
            .collect();
        let index = states.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Self { states, index }
    }

    pub fn states_mut(&mut self) -> &mut [ParticipantState] {
        &mut self.states
    }

    pub fn state(&self, id: ParticipantId) -> Option<&ParticipantState> {
        self.index.get(&id).map(|&i| &self.states[i])
    }

    /// Settle one completed round: match winners gain `win_points`, both
    /// sides of a drawn match gain `draw_points`, losers and both sides
    /// of a forfeited match gain nothing, and every bye is credited as a
    /// draw.
    pub fn apply_round_results(
        &mut self,
        round: &Round,
        results: &[MatchResult],
        config: &TournamentConfig,
    ) {
        for result in results {
            let (award_a, award_b) = match result.verdict {
                MatchVerdict::WinnerA => (config.win_points, 0),
                MatchVerdict::WinnerB => (0, config.win_points),
                MatchVerdict::Draw => (config.draw_points, config.draw_points),
                MatchVerdict::Forfeited => (0, 0),
            };
            self.award(result.pairing.a, award_a);
            self.award(result.pairing.b, award_b);
        }
        for &id in &round.byes {
            self.award(id, config.draw_points);
        }
        debug!(round = round.number, "standings settled");
    }

    fn award(&mut self, id: ParticipantId, points: u32) {
        if let Some(&i) = self.index.get(&id) {
            self.states[i].points += points;
        }
    }

    /// Current ranking: descending points, ties broken by registration
    /// order. Read-only and stable across repeated calls.
    pub fn standings(&self) -> Vec<&ParticipantState> {
        let mut ranked: Vec<&ParticipantState> = self.states.iter().collect();
        ranked.sort_by_key(|s| (std::cmp::Reverse(s.points), s.seed));
        ranked
    }
}

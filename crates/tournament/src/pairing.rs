//! Swiss pairing: build the compatibility graph and commit a round.

use crate::matching::{minimum_weight_matching, Edge};
use swiss_core::{Pairing, ParticipantState, Round};

/// Weight added to an edge when both endpoints still have no bye.
///
/// Making never-byed pairs expensive steers the matcher toward pairing a
/// never-byed participant with an already-byed one, so that when someone
/// must sit out it is a participant who has not sat out before. It is a
/// heuristic, not a hard rule, and must dominate any realistic point
/// spread to work.
const BYE_AVOID_PENALTY: u32 = 1_000;

/// Source of each round's pairings.
///
/// The controller drives whatever strategy it is given; `PairingEngine`
/// is the Swiss implementation.
pub trait PairingStrategy: Send {
    fn compute_pairings(&self, number: u32, roster: &mut [ParticipantState]) -> Round;
}

/// Builds one round of pairings from the current roster state.
pub struct PairingEngine {
    bye_penalty: u32,
}

impl Default for PairingEngine {
    fn default() -> Self {
        Self {
            bye_penalty: BYE_AVOID_PENALTY,
        }
    }
}

impl PairingEngine {
    /// Compute the pairings and byes for round `number` and commit them
    /// to the roster: paired participants record each other as faced,
    /// byed participants get their bye flag set.
    ///
    /// Edges exist only between participants who have never met (hard
    /// constraint); weight is the point difference plus the bye-avoidance
    /// penalty. A participant with no valid partner at all receives a
    /// bye; a deliberate fallback, not an error.
    pub fn compute_pairings(&self, number: u32, roster: &mut [ParticipantState]) -> Round {
        let mut edges = Vec::new();
        for i in 0..roster.len() {
            for j in (i + 1)..roster.len() {
                if roster[i].has_faced(roster[j].id) {
                    continue;
                }
                let diff = roster[i].points.abs_diff(roster[j].points);
                let penalty = if !roster[i].had_bye && !roster[j].had_bye {
                    self.bye_penalty
                } else {
                    0
                };
                edges.push(Edge::new(i, j, diff + penalty));
            }
        }

        let matched = minimum_weight_matching(roster.len(), &edges);

        let mut pairings = Vec::new();
        let mut in_pairing = vec![false; roster.len()];
        for &(i, j) in &matched {
            in_pairing[i] = true;
            in_pairing[j] = true;
            let (id_i, id_j) = (roster[i].id, roster[j].id);
            roster[i].faced.insert(id_j);
            roster[j].faced.insert(id_i);
            pairings.push(Pairing::new(id_i, id_j));
        }

        let mut byes = Vec::new();
        for (i, state) in roster.iter_mut().enumerate() {
            if !in_pairing[i] {
                state.had_bye = true;
                byes.push(state.id);
            }
        }

        // More than the natural odd-roster single bye means the
        // no-repeat constraint forced someone out despite an available
        // peer.
        let natural_byes = roster.len() % 2;
        let fallback_used = byes.len() > natural_byes;

        // Enumeration order of the matching is an implementation detail;
        // sort by points then id so rendered output is deterministic.
        let key = |p: &Pairing| {
            let pts = |id| roster.iter().find(|s| s.id == id).map_or(0, |s| s.points);
            (pts(p.a).min(pts(p.b)), pts(p.a).max(pts(p.b)), p.a)
        };
        pairings.sort_by_key(key);
        byes.sort();

        Round {
            number,
            pairings,
            byes,
            fallback_used,
        }
    }
}

impl PairingStrategy for PairingEngine {
    fn compute_pairings(&self, number: u32, roster: &mut [ParticipantState]) -> Round {
        PairingEngine::compute_pairings(self, number, roster)
    }
}

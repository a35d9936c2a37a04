//! Core tournament data model: moves, participants, pairings, rounds.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One of the three duel moves. They form a cyclic dominance ring:
/// Swift beats Reactive, Reactive beats Forceful, Forceful beats Swift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Swift,
    Reactive,
    Forceful,
}

impl Move {
    /// All moves in ring order.
    pub const ALL: [Move; 3] = [Move::Swift, Move::Reactive, Move::Forceful];

    /// Position on the dominance ring.
    fn ordinal(self) -> u8 {
        match self {
            Move::Swift => 0,
            Move::Reactive => 1,
            Move::Forceful => 2,
        }
    }

    /// Resolve two moves. `(a + 1) % 3 == b` means a beats b; equal moves
    /// draw; otherwise b beats a. Total and anti-symmetric over all pairs.
    pub fn duel(self, other: Move) -> ContestOutcome {
        let (a, b) = (self.ordinal(), other.ordinal());
        if a == b {
            ContestOutcome::Draw
        } else if (a + 1) % 3 == b {
            ContestOutcome::WinnerA
        } else {
            ContestOutcome::WinnerB
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Swift => "Swift",
            Move::Reactive => "Reactive",
            Move::Forceful => "Forceful",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "swift" => Ok(Move::Swift),
            "reactive" => Ok(Move::Reactive),
            "forceful" => Ok(Move::Forceful),
            other => Err(format!("unknown move: {other}")),
        }
    }
}

/// Outcome of a single duel between the two sides of a pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContestOutcome {
    WinnerA,
    WinnerB,
    Draw,
    /// One or both sides failed to answer before the deadline.
    /// Scores as a draw: neither side's match score moves.
    Incomplete,
}

/// Stable participant identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tournament entrant: identity plus display name. Created once per
/// entry and shared read-only by every round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
        }
    }
}

/// Mutable per-tournament record for one participant.
///
/// Owned by the standings tracker and mutated only at round boundaries:
/// the pairing engine updates `faced` and `had_bye` when it commits a
/// round's pairings, the tracker updates `points` once every match of the
/// round has finished.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticipantState {
    pub id: ParticipantId,
    /// Registration order, used as the stable standings tiebreak.
    pub seed: usize,
    /// Cumulative points across completed rounds.
    pub points: u32,
    /// Opponents already faced; a pair appears here iff they were paired
    /// (not byed) in some round.
    pub faced: HashSet<ParticipantId>,
    /// Whether this participant has already sat out a round.
    pub had_bye: bool,
}

impl ParticipantState {
    pub fn new(id: ParticipantId, seed: usize) -> Self {
        Self {
            id,
            seed,
            points: 0,
            faced: HashSet::new(),
            had_bye: false,
        }
    }

    pub fn has_faced(&self, other: ParticipantId) -> bool {
        self.faced.contains(&other)
    }
}

/// Unordered pair of participants for one round. Normalized so that
/// `a < b`, which makes equal pairings compare equal regardless of the
/// order they were built in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub a: ParticipantId,
    pub b: ParticipantId,
}

impl Pairing {
    pub fn new(x: ParticipantId, y: ParticipantId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.a == id || self.b == id
    }
}

/// One full cycle of pairings and byes across the active roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub pairings: Vec<Pairing>,
    pub byes: Vec<ParticipantId>,
    /// True when the no-repeat-opponent constraint left some participant
    /// with no valid pairing even though a peer was still available.
    pub fallback_used: bool,
}

impl Round {
    /// Check that the round exactly partitions the roster: every id in
    /// exactly one pairing or the bye set, never both, never twice.
    pub fn validate(&self, roster: &[ParticipantId]) -> Result<(), String> {
        let mut seen = HashSet::new();
        for p in &self.pairings {
            if p.a == p.b {
                return Err(format!("participant {} paired with itself", p.a));
            }
            for id in [p.a, p.b] {
                if !seen.insert(id) {
                    return Err(format!("participant {id} appears twice in round {}", self.number));
                }
            }
        }
        for &id in &self.byes {
            if !seen.insert(id) {
                return Err(format!("byed participant {id} also appears in a pairing"));
            }
        }
        if seen.len() != roster.len() || roster.iter().any(|id| !seen.contains(id)) {
            return Err(format!(
                "round {} covers {} participants, roster has {}",
                self.number,
                seen.len(),
                roster.len()
            ));
        }
        Ok(())
    }
}

/// A single resolved duel. Ephemeral: retained only inside the match
/// record it belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Contest {
    pub move_a: Option<Move>,
    pub move_b: Option<Move>,
    pub outcome: ContestOutcome,
}

/// How a finished match is decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    WinnerA,
    WinnerB,
    Draw,
    /// The match could not run (collaborator channel failure). Neither
    /// side scores this round.
    Forfeited,
}

/// Result of one best-of-N match between a pairing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub pairing: Pairing,
    pub contests: Vec<Contest>,
    pub score_a: u32,
    pub score_b: u32,
    pub verdict: MatchVerdict,
}

impl MatchResult {
    /// A zero-score forfeit record for a match that failed to run.
    pub fn forfeited(pairing: Pairing) -> Self {
        Self {
            pairing,
            contests: Vec::new(),
            score_a: 0,
            score_b: 0,
            verdict: MatchVerdict::Forfeited,
        }
    }
}

//! Tournament results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use swiss_core::{
    MatchResult, MatchVerdict, Participant, ParticipantId, ParticipantState, Round,
    TournamentConfig,
};

/// Everything that happened in one round: the pairings/byes and the
/// finished matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: Round,
    pub matches: Vec<MatchResult>,
}

/// One line of the final standings table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub id: ParticipantId,
    pub name: String,
    pub points: u32,
    pub had_bye: bool,
}

/// Complete record of a finished tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentReport {
    /// Configuration used
    pub config: TournamentConfig,
    /// Participating roster, in registration order
    pub participants: Vec<Participant>,
    /// Per-round pairings and match results
    pub rounds: Vec<RoundRecord>,
    /// Final ranking
    pub standings: Vec<StandingRow>,
}

impl TournamentReport {
    pub fn new(
        config: &TournamentConfig,
        participants: &[Participant],
        rounds: &[RoundRecord],
        ranked: &[&ParticipantState],
    ) -> Self {
        let name_of = |id: ParticipantId| {
            participants
                .iter()
                .find(|p| p.id == id)
                .map_or_else(|| id.to_string(), |p| p.name.clone())
        };
        let standings = ranked
            .iter()
            .map(|s| StandingRow {
                id: s.id,
                name: name_of(s.id),
                points: s.points,
                had_bye: s.had_bye,
            })
            .collect();
        Self {
            config: config.clone(),
            participants: participants.to_vec(),
            rounds: rounds.to_vec(),
            standings,
        }
    }

    fn name_of(&self, id: ParticipantId) -> String {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    /// Save the report to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write: {}", e))
    }

    /// Load a report from a JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read: {}", e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}", e))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!(
            "=== Tournament: {} rounds, best-of-{} matches ===\n\n",
            self.config.rounds, self.config.contests_per_match
        ));

        for record in &self.rounds {
            report.push_str(&format!("Round {}:\n", record.round.number));
            for m in &record.matches {
                let outcome = match m.verdict {
                    MatchVerdict::WinnerA => "1-0",
                    MatchVerdict::WinnerB => "0-1",
                    MatchVerdict::Draw => "1/2",
                    MatchVerdict::Forfeited => "void",
                };
                report.push_str(&format!(
                    "  {:<16} vs {:<16} {:>2}-{:<2} ({})\n",
                    self.name_of(m.pairing.a),
                    self.name_of(m.pairing.b),
                    m.score_a,
                    m.score_b,
                    outcome
                ));
            }
            for &id in &record.round.byes {
                report.push_str(&format!("  {:<16} has a bye\n", self.name_of(id)));
            }
        }

        report.push_str("\nFinal standings:\n");
        report.push_str(&format!("{:<4} {:<16} {:>6}\n", "#", "Participant", "Pts"));
        report.push_str(&"-".repeat(28));
        report.push('\n');
        for (rank, row) in self.standings.iter().enumerate() {
            report.push_str(&format!(
                "{:<4} {:<16} {:>6}\n",
                rank + 1,
                row.name,
                row.points
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

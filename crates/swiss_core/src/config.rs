//! Tournament-wide configuration, read-only for the engine's lifetime.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a whole tournament.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Number of Swiss rounds to play.
    pub rounds: u32,
    /// Duels per match (best-of-N).
    pub contests_per_match: u32,
    /// Points awarded for winning a match.
    pub win_points: u32,
    /// Points awarded to each side of a drawn match, and for a bye.
    pub draw_points: u32,
    /// Seconds a participant has to answer a move prompt.
    pub move_timeout_secs: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            rounds: 3,
            contests_per_match: 3,
            win_points: 3,
            draw_points: 1,
            move_timeout_secs: 30,
        }
    }
}

impl TournamentConfig {
    /// Deadline for a single move request.
    pub fn move_timeout(&self) -> Duration {
        Duration::from_secs(self.move_timeout_secs)
    }

    /// Parse from TOML text; missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read config: {}", e))?;
        Self::from_toml_str(&contents)
    }
}

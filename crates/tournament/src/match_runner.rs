//! Match runner: a best-of-N sequence of duels between one pairing.

use std::sync::Arc;

use swiss_core::{
    AnnounceScope, Announcer, ContestOutcome, MatchResult, MatchVerdict, MoveProvider, Pairing,
    Participant, TournamentConfig, TournamentError,
};
use tracing::debug;

use crate::contest::ContestResolver;

/// Runs all duels of one match and tallies the score.
#[derive(Clone)]
pub struct MatchRunner {
    resolver: ContestResolver,
    announcer: Arc<dyn Announcer>,
    config: TournamentConfig,
}

impl MatchRunner {
    pub fn new(
        provider: Arc<dyn MoveProvider>,
        announcer: Arc<dyn Announcer>,
        config: TournamentConfig,
    ) -> Self {
        Self {
            resolver: ContestResolver::new(provider, announcer.clone(), config.move_timeout()),
            announcer,
            config,
        }
    }

    /// Run `contests_per_match` duels strictly in sequence: duel k+1 is
    /// not issued until duel k is resolved and announced, so a
    /// participant never sees two prompts at once. Won duels move the
    /// winner's score by one; drawn or incomplete duels move neither.
    pub async fn run_match(
        &self,
        round: u32,
        a: &Participant,
        b: &Participant,
    ) -> Result<MatchResult, TournamentError> {
        let total = self.config.contests_per_match;
        let mut contests = Vec::with_capacity(total as usize);
        let mut score_a = 0u32;
        let mut score_b = 0u32;

        for duel in 1..=total {
            let prompt = format!(
                "Round {round}, duel {duel}/{total}: choose Swift, Reactive or Forceful"
            );
            let contest = self.resolver.run_contest(a, b, &prompt).await?;
            match contest.outcome {
                ContestOutcome::WinnerA => score_a += 1,
                ContestOutcome::WinnerB => score_b += 1,
                ContestOutcome::Draw | ContestOutcome::Incomplete => {}
            }
            debug!(
                round,
                duel,
                a = %a.name,
                b = %b.name,
                score = format!("{score_a}-{score_b}"),
                "duel resolved"
            );
            contests.push(contest);
        }

        let verdict = match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => MatchVerdict::WinnerA,
            std::cmp::Ordering::Less => MatchVerdict::WinnerB,
            std::cmp::Ordering::Equal => MatchVerdict::Draw,
        };

        let summary = match verdict {
            MatchVerdict::WinnerA => {
                format!("{} defeats {} {}-{}", a.name, b.name, score_a, score_b)
            }
            MatchVerdict::WinnerB => {
                format!("{} defeats {} {}-{}", b.name, a.name, score_b, score_a)
            }
            _ => format!("{} and {} draw {}-{}", a.name, b.name, score_a, score_b),
        };
        self.announcer
            .announce(AnnounceScope::Tournament, &summary)
            .await?;

        Ok(MatchResult {
            pairing: Pairing::new(a.id, b.id),
            contests,
            score_a,
            score_b,
            verdict,
        })
    }
}

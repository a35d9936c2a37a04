//! End-to-end tournament scenarios over the full controller.

use std::collections::HashSet;
use std::sync::Arc;

use swiss_core::{Move, Participant, Pairing, TournamentConfig};
use tournament::{BufferAnnouncer, Phase, ScriptedProvider, TournamentController};

fn roster(names: &[&str]) -> Vec<Participant> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Participant::new(i as u64, *name))
        .collect()
}

/// 5 participants over 3 rounds: every round is 2 pairings + 1 bye, no
/// pair meets twice, and the bye rotates to someone who has not had one.
#[tokio::test]
async fn five_participants_three_rounds() {
    let participants = roster(&["Aria", "Bram", "Cass", "Dunn", "Elia"]);
    let provider = Arc::new(ScriptedProvider::new());
    for p in &participants {
        // Everyone always answers Swift, so every duel draws and points
        // stay flat; pairing choices are driven purely by history.
        provider.script(p.id, vec![Move::Swift; 12]);
    }

    let config = TournamentConfig {
        rounds: 3,
        ..Default::default()
    };
    let draw_points = config.draw_points;
    let mut controller = TournamentController::new(
        config,
        participants,
        provider,
        Arc::new(BufferAnnouncer::new()),
    );
    let report = controller.run().await.unwrap();
    assert_eq!(controller.phase(), Phase::Completed);

    let mut seen_pairings: HashSet<Pairing> = HashSet::new();
    let mut byes = Vec::new();
    for record in &report.rounds {
        // Exact partition of the odd roster.
        assert_eq!(record.round.pairings.len(), 2);
        assert_eq!(record.round.byes.len(), 1);
        assert!(!record.round.fallback_used);

        for p in &record.round.pairings {
            assert!(seen_pairings.insert(*p), "pairing {p:?} repeated");
        }
        byes.push(record.round.byes[0]);
    }

    // Bye avoidance: three rounds, three different participants sat out.
    let distinct: HashSet<_> = byes.iter().collect();
    assert_eq!(distinct.len(), 3);

    // All duels drew, so each round awards draw points to everyone:
    // 2 matches * 2 sides + 1 bye, times 3 rounds.
    let total: u32 = report.standings.iter().map(|row| row.points).sum();
    assert_eq!(total, 3 * 5 * draw_points);
}

/// 4 participants over 3 rounds exhaust every possible pairing exactly
/// once, with no byes at all.
#[tokio::test]
async fn four_participants_play_a_complete_swiss() {
    let participants = roster(&["Aria", "Bram", "Cass", "Dunn"]);
    let provider = Arc::new(ScriptedProvider::new());
    for p in &participants {
        provider.script(p.id, vec![Move::Forceful; 9]);
    }

    let config = TournamentConfig {
        rounds: 3,
        ..Default::default()
    };
    let mut controller = TournamentController::new(
        config,
        participants,
        provider,
        Arc::new(BufferAnnouncer::new()),
    );
    let report = controller.run().await.unwrap();

    let mut seen = HashSet::new();
    for record in &report.rounds {
        assert_eq!(record.round.pairings.len(), 2);
        assert!(record.round.byes.is_empty());
        for p in &record.round.pairings {
            seen.insert(*p);
        }
    }
    // 3 rounds x 2 pairings covers all C(4,2) pairs.
    assert_eq!(seen.len(), 6);
}

/// Once every pair has met, the engine falls back to an all-bye round
/// instead of failing.
#[tokio::test]
async fn exhausted_roster_falls_back_to_byes() {
    let participants = roster(&["Aria", "Bram"]);
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
    let (win_points, draw_points) = (config.win_points, config.draw_points);
    let mut controller = TournamentController::new(
        config,
        participants,
        provider,
        Arc::new(BufferAnnouncer::new()),
    );
    let report = controller.run().await.unwrap();

    // Round 1 was a real match, round 2 had nobody left to pair.
    assert_eq!(report.rounds[0].round.pairings.len(), 1);
    assert!(report.rounds[1].round.pairings.is_empty());
    assert_eq!(report.rounds[1].round.byes.len(), 2);
    assert!(report.rounds[1].round.fallback_used);

    // Swift sweeps Reactive 3-0, then both collect the bye credit.
    assert_eq!(report.standings[0].name, "Aria");
    assert_eq!(report.standings[0].points, win_points + draw_points);
    assert_eq!(report.standings[1].points, draw_points);
}

/// A participant who never answers leaves every duel incomplete: the
/// match draws 0-0 and the outcome text says so.
#[tokio::test(start_paused = true)]
async fn silent_participant_draws_through_timeouts() {
    let participants = roster(&["Aria", "Bram"]);
    let provider = Arc::new(ScriptedProvider::new());
    provider.script(
        participants[0].id,
        vec![Move::Swift, Move::Swift, Move::Swift],
    );
    // Bram never answers.

    let config = TournamentConfig {
        rounds: 1,
        ..Default::default()
    };
    let announcer = Arc::new(BufferAnnouncer::new());
    let mut controller =
        TournamentController::new(config, participants, provider, announcer.clone());
    let report = controller.run().await.unwrap();

    let result = &report.rounds[0].matches[0];
    assert_eq!((result.score_a, result.score_b), (0, 0));
    assert!(result
        .contests
        .iter()
        .all(|c| c.outcome == swiss_core::ContestOutcome::Incomplete));

    assert!(announcer
        .messages()
        .iter()
        .any(|m| m.contains("did not respond in time")));

    // Drawn match: both sides take the draw award.
    assert_eq!(report.standings[0].points, report.standings[1].points);
}

//! Tournament CLI
//!
//! Run a simulated Swiss tournament with random participants.

use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use swiss_core::{Participant, TournamentConfig};
use tournament::{LogAnnouncer, RandomProvider, TournamentController};

const ROSTER_NAMES: &[&str] = &[
    "Aria", "Bram", "Cass", "Dunn", "Elia", "Finn", "Gwen", "Hale", "Iris", "Joss", "Kira", "Lund",
];

fn print_usage() {
    println!("Swiss Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament [--participants N] [--rounds R] [--contests C] [--config FILE]");
    println!();
    println!("Options:");
    println!("  --participants N   Roster size, up to {} (default 5)", ROSTER_NAMES.len());
    println!("  --rounds R         Swiss rounds to play (default 3)");
    println!("  --contests C       Duels per match (default 3)");
    println!("  --config FILE      TOML file with tournament settings");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let mut roster_size: usize = 5;
    let mut config = TournamentConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--participants" | "-p" => {
                if i + 1 < args.len() {
                    roster_size = args[i + 1].parse().unwrap_or(5);
                    i += 1;
                }
            }
            "--rounds" | "-r" => {
                if i + 1 < args.len() {
                    config.rounds = args[i + 1].parse().unwrap_or(config.rounds);
                    i += 1;
                }
            }
            "--contests" | "-c" => {
                if i + 1 < args.len() {
                    config.contests_per_match =
                        args[i + 1].parse().unwrap_or(config.contests_per_match);
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config = TournamentConfig::load(Path::new(&args[i + 1]))
                        .map_err(anyhow::Error::msg)
                        .context("loading config file")?;
                    i += 1;
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                return Ok(());
            }
        }
        i += 1;
    }

    let roster_size = roster_size.min(ROSTER_NAMES.len());
    let participants: Vec<Participant> = ROSTER_NAMES
        .iter()
        .take(roster_size)
        .enumerate()
        .map(|(i, name)| Participant::new(i as u64, *name))
        .collect();

    println!(
        "=== Swiss tournament: {} participants, {} rounds, best-of-{} ===",
        participants.len(),
        config.rounds,
        config.contests_per_match
    );

    let mut controller = TournamentController::new(
        config,
        participants,
        Arc::new(RandomProvider),
        Arc::new(LogAnnouncer),
    );
    let report = controller.run().await?;

    report.print_report();
    if let Err(e) = report.save(Path::new("tournament_results.json")) {
        eprintln!("Warning: Failed to save results: {}", e);
    }

    Ok(())
}

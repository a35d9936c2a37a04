//! Swiss-style tournament engine
//!
//! This crate provides infrastructure for:
//! - Pairing a roster round by round while avoiding repeat opponents
//!   and balancing byes (weighted minimum-weight matching)
//! - Resolving best-of-N duel matches with concurrent move collection
//! - Tracking cumulative standings and producing reports
//!
//! # Usage
//!
//! ```bash
//! # Run a simulated 3-round tournament with 5 random participants
//! cargo run -p tournament -- --participants 5 --rounds 3
//! ```

mod contest;
mod controller;
mod match_runner;
mod matching;
mod pairing;
mod providers;
mod results;
mod standings;

pub use contest::*;
pub use controller::*;
pub use match_runner::*;
pub use matching::*;
pub use pairing::*;
pub use providers::*;
pub use results::*;
pub use standings::*;

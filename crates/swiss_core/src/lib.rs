pub mod channel;
pub mod config;
pub mod error;
pub mod types;

// Re-export core tournament model (not runner-specific)
pub use channel::*;
pub use config::*;
pub use error::*;
pub use types::*;

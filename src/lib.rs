//! Social todo board library
//!
//! This library provides an in-memory board of todos with categories,
//! progress tracking, likes and comments, attributed to wallet-derived
//! identities, plus the command-line surface that drives it.

mod cli;
mod config;
mod errors;
mod helper;
mod seed;
mod store;
mod todo;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use helper::*;
pub use seed::*;
pub use store::*;
pub use todo::*;
pub use types::*;

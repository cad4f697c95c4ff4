//! Command-line surface of the todoboard application.
mod app;
mod main;

pub use app::*;
pub use main::*;

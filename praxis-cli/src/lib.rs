//! Command-line front end for the `praxis-core` tax engine.

pub mod amount;
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod scenario_loader;

pub use cli::{Cli, Command};

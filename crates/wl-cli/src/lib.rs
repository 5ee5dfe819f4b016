//! Combat log analyzer CLI library.
//!
//! This crate provides the CLI interface for the session analysis engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DomainArg};
pub use config::Config;

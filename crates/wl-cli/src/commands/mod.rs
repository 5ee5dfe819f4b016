//! CLI subcommand implementations.

pub mod report;
pub mod sessions;
pub mod util;

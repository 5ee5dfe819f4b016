//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Combat log analyzer.
///
/// Splits a typed combat log into fights, sieges, relic raids and
/// battleground visits, and reports statistics over them.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Name of the character who wrote the log (overrides `owner_name`).
    #[arg(long, global = true)]
    pub owner: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the sessions of one domain.
    Sessions {
        /// Event log in JSON Lines format.
        file: PathBuf,

        /// Which sessions to list.
        #[arg(long, value_enum, default_value_t = DomainArg::Combat)]
        domain: DomainArg,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Aggregate statistics over every domain.
    Report {
        /// Event log in JSON Lines format.
        file: PathBuf,

        /// Group sieges by keep type instead of keep name.
        #[arg(long)]
        group_by_keep_type: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Session domain selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    /// Combat sessions (long idle gap).
    Combat,
    /// Single fights (short idle gap).
    Instances,
    Sieges,
    Relics,
    Battlegrounds,
}

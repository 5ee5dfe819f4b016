use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::{report, sessions};
use wl_cli::{Cli, Commands, Config};
use wl_core::{AnalysisConfig, EntityName};

/// Load and validate config, applying the `--owner` override.
fn load_config(config_path: Option<&Path>, owner: Option<&str>) -> Result<AnalysisConfig> {
    let mut config = Config::load_from(config_path)
        .context("failed to load configuration")?
        .analysis;

    if let Some(owner) = owner {
        config.owner_name = EntityName::new(owner).context("invalid --owner")?;
    }

    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Sessions { file, domain, json }) => {
            let config = load_config(cli.config.as_deref(), cli.owner.as_deref())?;
            sessions::run(file, &config, *domain, *json)?;
        }
        Some(Commands::Report {
            file,
            group_by_keep_type,
            json,
        }) => {
            let config = load_config(cli.config.as_deref(), cli.owner.as_deref())?;
            report::run(file, &config, *group_by_keep_type, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}

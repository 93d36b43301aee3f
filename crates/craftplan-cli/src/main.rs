//! Craftplan - recipe planner.
//!
//! Looks up recipes, resolves production chains and checks stock from the
//! command line.

#![deny(clippy::unwrap_used)]

mod cli;
mod config;

use std::io;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use craftplan_crafting::{load_catalog, RecipeCatalog};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{Commands, Context};
use crate::config::{PlannerConfig, CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(
    name = "craftplan",
    version,
    about = "Recipe lookup and production-chain planning"
)]
struct Cli {
    /// Path to the planner config
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Recipe file or directory, overriding the config
    #[arg(short, long, global = true)]
    recipes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = PlannerConfig::try_load_from(&cli.config);
    let log_filter = match &loaded {
        Ok(Some(config)) => config.log_filter.clone(),
        _ => config::DEFAULT_LOG_FILTER.to_string(),
    };
    let log_json = matches!(&loaded, Ok(Some(config)) if config.log_json);
    init_tracing(&log_filter, log_json)?;

    let config = PlannerConfig::from_loaded(loaded, &cli.config);

    let loaded_catalog;
    let catalog: &RecipeCatalog = match cli.recipes.as_ref().or(config.recipe_path.as_ref()) {
        Some(path) => {
            loaded_catalog = load_catalog(path)
                .with_context(|| format!("loading recipes from {}", path.display()))?;
            &loaded_catalog
        },
        None => {
            info!("Using built-in recipe catalog");
            RecipeCatalog::builtin()
        },
    };

    let ctx = Context {
        catalog,
        config: &config,
        config_path: &cli.config,
    };
    cli::dispatch(cli.command, &ctx, &mut io::stdout().lock())
}

/// Logs go to stderr so command output stays machine-readable.
fn init_tracing(filter: &str, json: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(filter)?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
    }
    Ok(())
}

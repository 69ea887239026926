//! LeadLens library root.
//! Exposes the CLI parser, the high-level run() function and the pipeline
//! modules (source → join → filter → kpi) for reuse and testing.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod source;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::Path;
use utils::path::resolve_config_path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, cfg_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init { force } => cli::commands::init::handle(cfg_path, *force),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, cfg_path),
        Commands::Sources { .. } => cli::commands::sources::handle(&cli.command, cfg),
        Commands::Dashboard { .. } => cli::commands::dashboard::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load the config once (defaults when the file is missing)
    let cfg_path = resolve_config_path(cli.config.as_deref());
    let cfg = match &cli.command {
        // init must work even when the existing file is broken
        Commands::Init { .. } => Config::default(),
        _ => Config::load_from(&cfg_path)?,
    };
    tracing::debug!(path = %cfg_path.display(), sources = cfg.sources.len(), "configuration loaded");

    // 3️⃣ dispatch
    dispatch(&cli, &cfg, &cfg_path)
}

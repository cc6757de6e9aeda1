//! `logopedia` console front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the record store.
//! - Run the interactive menu or a single scriptable command.
//! - Close the store before exiting.

use anyhow::Context;
use clap::Parser;
use log::info;
use logopedia_core::{init_logging, AppController, Store};

mod cli;
mod commands;
mod config;
mod output;

fn main() {
    if let Err(error) = run() {
        eprintln!("logopedia error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = config::AppConfig::from_cli(&cli)?;

    // A broken log directory must not block access to the records.
    if let Err(err) = init_logging(&config.logging) {
        eprintln!("logopedia warning: logging disabled: {err}");
    }

    let store = Store::open(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let mut app = AppController::new(store, config.language);
    info!(
        "event=cli_start module=cli status=ok language={}",
        config.language.code()
    );

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();
    let result = commands::dispatch(cli.command, &mut app, &mut input, &mut out);

    app.close().context("failed to close database")?;
    result
}

//! # Review Board Binary
//!
//! The entry point that assembles the application from configuration and
//! runs the terminal session on stdin/stdout.

mod commands;
mod render;
mod session;
mod terminal;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::Local;
use configs::{AppConfig, LogConfig, StorageBackend, StorageConfig};
use domains::KeyValueStorage;
use services::{ReviewController, ReviewStore, SystemClock, UuidIds};
use tracing_subscriber::EnvFilter;

use session::Session;
use terminal::Terminal;

fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);

    let storage = build_storage(&config.storage)?;
    let store = ReviewStore::load(storage, config.storage.key.clone());
    let controller = ReviewController::new(store, Box::new(UuidIds), Box::new(SystemClock));

    let offset = *Local::now().offset();
    let mut session = Session::new(controller, offset);

    tracing::info!(backend = ?config.storage.backend, key = %config.storage.key, "review board ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut term = Terminal::new(stdin.lock(), stdout.lock());
    print_banner(&mut term)?;
    session.run(&mut term)
}

/// Logs go to stderr so they never interleave with the rendered view.
fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_storage(config: &StorageConfig) -> Result<Box<dyn KeyValueStorage>> {
    match config.backend {
        #[cfg(feature = "storage-file")]
        StorageBackend::File => Ok(Box::new(
            storage_adapters::LocalFileStorage::new(&config.dir).with_quota(config.quota_bytes),
        )),
        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => Ok(Box::new(match config.quota_bytes {
            Some(quota) => storage_adapters::InMemoryStorage::with_quota(quota),
            None => storage_adapters::InMemoryStorage::new(),
        })),
        #[allow(unreachable_patterns)]
        other => bail!("storage backend {:?} is not compiled into this binary", other),
    }
}

fn print_banner<R: BufRead, W: Write>(term: &mut Terminal<R, W>) -> Result<()> {
    writeln!(term.output, "Review board. Type `help` for commands.\n")?;
    Ok(())
}

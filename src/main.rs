//! # policy-history - Alert history for scheduled snapshot policies
//!
//! A terminal view over the alerts a snapshot policy has raised, with a
//! time window selector and expandable error/warning rows.

mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};

use policy_history::config::Config;
use policy_history::constants::{log_file_path, LANGUAGES, MAX_RECENT_LIMIT};
use policy_history::logging::{self, Verbosity};
use policy_history::store::AlertStore;

/// policy-history - Terminal alert history for snapshot policies
#[derive(Parser, Debug)]
#[command(name = "policy-history", version, about = "Browse the alert history of scheduled snapshot policies")]
struct Cli {
    /// Alert database path (default: ~/.local/share/policy-history/alerts.db)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Policy id to show on startup
    #[arg(long, short = 'p', value_name = "ID")]
    policy: Option<String>,

    /// UI language (en, de)
    #[arg(long, short = 'l', value_name = "LANG")]
    lang: Option<String>,

    /// Color theme (default, gruvbox, nord)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Populate the database with demo policies and alerts
    #[arg(long)]
    seed_demo: bool,

    /// Alerts shown for the default window
    #[arg(long, value_name = "N")]
    recent_limit: Option<usize>,

    /// Debug-level logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging first so config warnings land in the log
    let log_path = log_file_path();
    logging::init_subscriber(Verbosity::from_flag(cli.verbose), &log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    // Load and apply CLI overrides to config
    let mut config = Config::load();
    if let Some(ref db) = cli.db {
        config.db_path = db.clone();
    }
    if let Some(ref theme_name) = cli.theme {
        config.theme = theme_name.clone();
    }
    if let Some(ref lang) = cli.lang {
        config.lang = lang.clone();
    }
    if let Some(limit) = cli.recent_limit {
        config.default_recent_limit = limit.clamp(1, MAX_RECENT_LIMIT);
    }

    // Set UI language (CLI > config > default "en")
    if !LANGUAGES.contains(&config.lang.as_str()) {
        warn!(lang = %config.lang, "unsupported language, falling back to en");
        config.lang = "en".to_string();
    }
    rust_i18n::set_locale(&config.lang);

    let mut store = AlertStore::open(Some(&config.db_path))
        .with_context(|| format!("failed to open alert store {}", config.db_path.display()))?;
    store.set_recent_limit(config.default_recent_limit);
    if cli.seed_demo {
        store
            .seed_demo(chrono::Utc::now())
            .context("failed to seed demo data")?;
        info!("seeded demo policies");
    }
    for (table, rows) in store.table_stats().context("failed to read store stats")? {
        debug!(table = %table, rows, "store table");
    }

    // Build and run the application
    let mut app = app::App::new(&config, store, cli.policy.as_deref())?;
    app.run().await
}

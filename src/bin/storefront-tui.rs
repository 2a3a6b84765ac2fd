//! Storefront TUI Application
//!
//! A terminal user interface for browsing the catalog, filling a cart and
//! checking out.

use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use storefront::tui::{poll_event, restore_terminal, run_app, setup_terminal, AppState};
use storefront::{Config, Storefront};

/// Send logs to the configured file; the terminal belongs to the UI.
fn setup_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    setup_tracing(&config)?;

    let store = Storefront::from_config(&config)?;
    let mut state = AppState::new(store);
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &mut state, poll_event);
    restore_terminal(&mut terminal)?;
    result?;

    tracing::info!("storefront closed");
    Ok(())
}

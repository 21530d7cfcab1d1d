//! # inkpost-client
//!
//! Client core of the Inkpost blog front-end: configuration, the HTTP API
//! client, the home feed with its offline fallback, and the command handlers
//! the views call into.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod feed;
pub mod state;

#[cfg(test)]
mod test_support;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use state::AppState;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default filter. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("inkpost_client=debug,inkpost_store=info,warn"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Set up logging and build the application state from the environment.
pub fn start() -> Result<AppState> {
    init_logging();
    tracing::info!("Starting {}", inkpost_shared::constants::APP_NAME);
    AppState::new(ClientConfig::from_env())
}

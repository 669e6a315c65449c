//! # Trà Sữa Shop Library
//!
//! Core library for the shop shell. `run` loads configuration, starts
//! logging, opens a session against the shop service and hands stdin to
//! the shell loop.
//!
//! ## Module Organization
//! ```text
//! trasua_shop/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── shell.rs        ◄─── Line parsing (clap) and the read loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Environment, base URLs, formatting
//! │   └── session.rs  ◄─── Cart + API client for one shell run
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Menu and admin product commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── order.rs    ◄─── Checkout and admin order commands
//! │   └── dashboard.rs◄─── Admin counters
//! └── error.rs        ◄─── Error type shown to the user
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()        RUST_LOG or the default filter, to stderr     │
//! │  2. ConfigState::from_env .env + TRASUA_* variables                     │
//! │  3. Session::connect      reqwest client with base URL and timeout      │
//! │  4. shell::repl           one command per line until `exit` or EOF      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use anyhow::Context;
use tracing::{info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

use state::{ConfigState, Session};

/// Runs the shop shell until the user leaves.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(
        environment = ?config.environment,
        api = %config.api_base_url,
        "Starting Trà Sữa shop shell"
    );

    let mut session = Session::connect(config).context("failed to build the shop service client")?;
    let span = info_span!("session", id = %session.id());

    async {
        info!("Session opened");
        let result = shell::repl(&mut session).await;
        info!(cart_lines = session.cart().len(), "Session closed");
        result
    }
    .instrument(span)
    .await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=trasua_api=trace` - Trace the HTTP client only
/// - Default: `info` plus `debug` for the shop crates
///
/// Logs go to stderr so command output on stdout stays clean JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,trasua_shop=debug,trasua_api=debug,trasua_core=debug,reqwest=warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

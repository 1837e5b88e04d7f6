//! # Storefront Session Library
//!
//! Core library for the storefront session application.
//! This is the entry point that loads configuration and the catalog, then
//! serves commands over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Session cart (Arc<Mutex<Cart>>)
//! │   ├── catalog.rs  ◄─── Read-only catalog
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Browsing and variant selection
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── ipc.rs          ◄─── JSON-lines request loop
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ipc::Session;
use state::{CartState, CatalogState, ConfigState};

/// Runs one storefront session over stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,storefront_app=debug,storefront_catalog=debug       │
/// │       override with RUST_LOG                                            │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → STOREFRONT_* env vars                │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • catalog_path if set, else the bundled demo catalog                │
/// │     • malformed products are logged, not rejected                       │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CartState: new session id, empty cart                             │
/// │                                                                         │
/// │  5. Serve ────────────────────────────────────────────────────────────► │
/// │     • one JSON response per request line until stdin closes             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting storefront session");

    let config = ConfigState::load()?;
    info!(
        store = %config.store_domain(),
        api_version = %config.api_version,
        environment = %config.environment,
        "Configuration loaded"
    );

    let catalog = CatalogState::load(&config)?;
    let session = Session::new(catalog, CartState::new(), config);

    let summary = ipc::serve(
        &session,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    info!(item_count = summary.item_count, "Storefront session finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries the IPC responses.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_app=trace` - Show trace for the app only
/// - Default: INFO, DEBUG for storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,storefront_app=debug,storefront_catalog=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # Storefront Entry Point
//!
//! Starts one shopping session. The frontend talks to it by writing JSON
//! requests to stdin and reading JSON responses from stdout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend ──stdin──► storefront ──stdout──► Frontend                    │
//! │                          │                                              │
//! │                          └──stderr──► logs                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match storefront_app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Storefront session failed: {}", e);
            eprintln!("storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}

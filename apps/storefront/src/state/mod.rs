//! # State Module
//!
//! Manages session state for the storefront app.
//!
//! Each state type is constructed explicitly at startup and handed to the
//! commands that need it. There is no global cart: tests and embedders build
//! their own states.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Catalog     │  │  Arc<Mutex<  │  │  store_name      │              │
//! │  │  (products)  │  │    Cart      │  │  api_version     │              │
//! │  │              │  │  >>          │  │  add_delay_ms    │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: Read-only after load                                  │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartState, SessionSummary};
pub use catalog::CatalogState;
pub use config::{ApiVersion, ConfigError, ConfigState};

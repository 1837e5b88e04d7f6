//! # Commands Module
//!
//! All commands exposed to the storefront frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Catalog browsing, option selection, resolution
//! ├── cart.rs     ◄─── Cart manipulation
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend writes one JSON line to stdin:                               │
//! │  {"id":1,"cmd":"choose_option",                                        │
//! │   "args":{"productId":"classic-tee","optionName":"Size","value":"M"}}  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ipc::Session::dispatch                                                 │
//! │  ├── deserialize args into ChooseOptionArgs                            │
//! │  └── commands::product::choose_option(&catalog, ...)                   │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"id":1,"ok":{"resolution":"matched", ...}}  written to stdout         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState)
//!
//! // Only needs the cart (and config for formatting)
//! fn get_cart(cart: &CartState, config: &ConfigState)
//!
//! // Needs everything
//! async fn add_to_cart(catalog: &CatalogState, cart: &CartState, config: &ConfigState, ...)
//! ```

pub mod cart;
pub mod config;
pub mod product;

//! # destination-kit
//!
//! A minimal, Rust-native toolkit for building event-delivery destinations:
//! connector modules that turn inbound customer-data events into outbound
//! REST or GraphQL calls against third-party APIs.
//!
//! ## Features
//!
//! - **Declarative settings**: each destination declares its auth fields
//! - **Batch delivery**: SingleStore batches become one multi-row INSERT
//! - **GraphQL embedding**: scalar-escaping encoder for enum-bearing mappings
//! - **Fail-open lookups**: dynamic configuration fields never crash the UI
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use destination_kit::destinations::singlestore::{self, Settings};
//! use destination_kit::http::RequestClient;
//! use destination_kit::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = RequestClient::new();
//!     let settings: Settings = serde_json::from_str(r#"{
//!         "host": "db.example.com",
//!         "username": "admin",
//!         "password": "...",
//!         "dbName": "events"
//!     }"#)?;
//!
//!     let records = vec![/* EventRecord batch */];
//!     singlestore::send(&client, &settings, &records).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Destination Interface                   │
//! │  metadata()    authentication()    test_authentication()   │
//! └────────────────────────────────────────────────────────────┘
//!                              │
//! ┌───────────┬──────────────┬┴──────────────┬────────────────┐
//! │  Fields   │     HTTP     │  SingleStore  │   StackAdapt   │
//! ├───────────┼──────────────┼───────────────┼────────────────┤
//! │ Specs     │ POST JSON    │ Batch INSERT  │ GQL encoder    │
//! │ Defaults  │ Basic/Bearer │ Exec endpoint │ Adv. lookup    │
//! │ Validate  │ Status map   │ Timestamps    │ SHA-256 ids    │
//! └───────────┴──────────────┴───────────────┴────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the kit
pub mod error;

/// Common types and type aliases
pub mod types;

/// Settings-field schemas and validation
pub mod fields;

/// HTTP request dispatch
pub mod http;

/// Destination trait
pub mod destination;

/// Built-in destination modules
pub mod destinations;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use destination::{CheckResult, Destination};
pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

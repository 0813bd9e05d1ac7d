//! # Riskgrid Client - The Kit
//!
//! Client for the konteks risk-matrix REST API.
//!
//! The deterministic grid model lives in `riskgrid-core`; this crate
//! executes its reconciliation plans over HTTP (JSON, bearer-token
//! authenticated) and classifies the outcomes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use riskgrid_client::{KonteksClient, Session};
//! use riskgrid_core::{BandConfig, GridSize};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), riskgrid_client::Error> {
//!     let session = Session::new(token_from_login);
//!     let client = KonteksClient::new("https://risk.example.test/api", &session)?;
//!
//!     // Seed a brand-new 5×5 matrix from the default banding.
//!     let size = GridSize::new(5)?;
//!     let result = client
//!         .create_from_bands(42, &BandConfig::defaults(size))
//!         .await?;
//!     assert!(result.is_complete);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Failure semantics
//!
//! - 401 maps to [`Error::Auth`], distinct from generic server errors
//! - no local state is implied mutated unless the backend confirmed success
//! - a partially failed clear reports
//!   [`DeleteOutcome::Indeterminate`](riskgrid_core::DeleteOutcome) and the
//!   caller re-fetches authoritative state

mod client;
mod error;
mod session;
mod types;

pub use client::{KonteksClient, DEFAULT_PAGE_LIMIT};
pub use error::Error;
pub use session::Session;
pub use types::{BulkCreateRequest, BulkCreateResponse, BulkCreateResult, ListMatricesResponse, Pagination};

// Re-export the core crate for convenience
pub use riskgrid_core;

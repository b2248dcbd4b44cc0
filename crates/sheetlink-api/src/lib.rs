//! Wire model and REST transport for a Google-Sheets-shaped spreadsheet
//! service.
//!
//! This crate is the protocol half of sheetlink: it knows what the remote
//! service's JSON looks like and how to move it over HTTP, and nothing
//! about retries, tab resolution, or value shaping (those live in the
//! `sheetlink` facade crate).
//!
//! # Architecture
//!
//! ```text
//! sheetlink (facade crate)
//!     └── SheetsApi (trait, this crate)
//!           └── RestTransport (reqwest implementation)
//!                 └── TokenProvider (bearer token seam)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetlink_api::auth::StaticToken;
//! use sheetlink_api::transport::RestTransport;
//! use sheetlink_api::service::SheetsApi;
//!
//! # async fn example() -> sheetlink_api::error::Result<()> {
//! let transport = RestTransport::new(StaticToken::new("ya29.token"));
//! let spreadsheet = transport.get_spreadsheet("1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms").await?;
//! println!("{} tabs", spreadsheet.sheets.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod batch;
pub mod error;
pub mod service;
pub mod transport;
pub mod types;

// Re-export key types
pub use batch::{BatchRequest, BatchUpdateRequest};
pub use error::{ApiError, Result};
pub use service::SheetsApi;
pub use transport::RestTransport;
pub use types::{CellValue, MajorDimension, Sheet, Spreadsheet, ValueInputOption, ValueRange};

//! High-level client for a remote spreadsheet service.
//!
//! This crate wraps the wire-level `sheetlink-api` crate with the
//! operations callers actually want: create spreadsheets, manage tabs by
//! name, read/write/clear cell ranges, and reshape fetched values into
//! flat or key-grouped views. Every operation returns a `Result`; quota
//! errors on append writes are retried under a bounded, configurable
//! policy.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── Sheets (this crate: resolution, shaping, retry)
//!           └── SheetsApi (sheetlink-api: wire model + REST transport)
//!                 └── HTTPS to the spreadsheet service
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetlink::Sheets;
//! use sheetlink_api::auth::StaticToken;
//! use sheetlink_api::transport::RestTransport;
//!
//! # async fn example() -> sheetlink::error::Result<()> {
//! let client = Sheets::new(RestTransport::new(StaticToken::new("ya29.token")));
//!
//! let spreadsheet = client
//!     .create_and_write(
//!         "Inventory",
//!         "Stock",
//!         vec![vec!["sku".into(), "count".into()], vec!["A-1".into(), 12.into()]],
//!     )
//!     .await?;
//!
//! let rows = client.read_range(&spreadsheet.spreadsheet_id, "Stock!A1:B2").await?;
//! println!("{} rows", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod retry;
pub mod shape;

pub use client::{Sheets, WriteResponse};
pub use error::SheetsError;
pub use retry::RetryPolicy;
pub use shape::GroupKey;

// Re-export the wire types callers handle directly.
pub use sheetlink_api::{CellValue, MajorDimension, Sheet, Spreadsheet, ValueRange};

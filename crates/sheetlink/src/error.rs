//! Error types for the client facade.

use thiserror::Error;

use sheetlink_api::ApiError;

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("service call failed: {0}")]
    Api(#[from] ApiError),

    #[error("tab {title:?} not found in spreadsheet {spreadsheet_id}")]
    TabNotFound {
        title: String,
        spreadsheet_id: String,
    },

    #[error("tab {title:?} has no sheet id in the provided snapshot")]
    MissingTabId { title: String },

    #[error("expected a {expected} cell, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("key column {index} is out of range for row {row} of length {row_len}")]
    IndexOutOfRange {
        index: usize,
        row: usize,
        row_len: usize,
    },

    #[error("quota still exceeded after {attempts} attempts: {source}")]
    QuotaExhausted {
        attempts: u32,
        #[source]
        source: ApiError,
    },
}

pub type Result<T> = std::result::Result<T, SheetsError>;

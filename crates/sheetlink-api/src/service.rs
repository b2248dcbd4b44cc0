//! The consumed contract of the remote spreadsheet service.

use crate::batch::{BatchUpdateRequest, BatchUpdateResponse};
use crate::error::Result;
use crate::types::{
    AppendValuesResponse, ClearValuesResponse, Spreadsheet, SpreadsheetProperties,
    UpdateValuesResponse, ValueInputOption, ValueRange,
};

/// One async method per service endpoint.
///
/// `RestTransport` is the production implementation; tests drive the
/// facade through scripted implementations of this trait instead of a
/// live service.
#[allow(async_fn_in_trait)]
pub trait SheetsApi {
    /// Create a spreadsheet, returning its full descriptor
    /// (id, URL, initial default tab).
    async fn create_spreadsheet(&self, properties: SpreadsheetProperties) -> Result<Spreadsheet>;

    /// Fetch a spreadsheet snapshot (properties and tab list).
    async fn get_spreadsheet(&self, spreadsheet_id: &str) -> Result<Spreadsheet>;

    /// Submit an ordered list of mutations as one atomic call.
    async fn batch_update(
        &self,
        spreadsheet_id: &str,
        request: BatchUpdateRequest,
    ) -> Result<BatchUpdateResponse>;

    /// Fetch the cells addressed by `range`.
    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange>;

    /// Overwrite the cells addressed by `range`.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        body: ValueRange,
        input: ValueInputOption,
    ) -> Result<UpdateValuesResponse>;

    /// Append rows after the existing data in `range`.
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        body: ValueRange,
        input: ValueInputOption,
    ) -> Result<AppendValuesResponse>;

    /// Clear the cells addressed by `range` (values only, formatting kept).
    async fn clear_values(&self, spreadsheet_id: &str, range: &str)
        -> Result<ClearValuesResponse>;
}

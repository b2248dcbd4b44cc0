//! Client facade for manipulating a remote spreadsheet.

use indexmap::IndexMap;

use sheetlink_api::batch::{BatchRequest, BatchUpdateRequest, BatchUpdateResponse};
use sheetlink_api::types::{
    AppendValuesResponse, CellValue, ClearValuesResponse, MajorDimension, Sheet, Spreadsheet,
    SpreadsheetProperties, UpdateValuesResponse, ValueInputOption, ValueRange,
};
use sheetlink_api::SheetsApi;

use crate::error::{Result, SheetsError};
use crate::retry::RetryPolicy;
use crate::shape::{self, GroupKey};

/// Outcome of a range write, depending on the chosen mode.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteResponse {
    /// Overwrite mode: cells replaced in place.
    Updated(UpdateValuesResponse),
    /// Append mode: rows inserted after existing data.
    Appended(AppendValuesResponse),
}

/// High-level client over a spreadsheet service handle.
///
/// Stateless apart from the service handle and retry policy: tab
/// identities are never cached, and every by-name operation re-resolves
/// against a caller-supplied snapshot.
pub struct Sheets<S> {
    api: S,
    retry: RetryPolicy,
}

impl<S: SheetsApi> Sheets<S> {
    pub fn new(api: S) -> Self {
        Sheets {
            api,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(api: S, retry: RetryPolicy) -> Self {
        Sheets { api, retry }
    }

    /// Direct access to the underlying service handle.
    pub fn api(&self) -> &S {
        &self.api
    }

    // ========================================================================
    // Spreadsheet lifecycle
    // ========================================================================

    /// Create a spreadsheet, returning its full descriptor
    /// (id, URL, initial default tab).
    pub async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet> {
        let created = self
            .api
            .create_spreadsheet(SpreadsheetProperties::titled(title))
            .await?;
        tracing::info!(
            title,
            spreadsheet_id = %created.spreadsheet_id,
            url = %created.spreadsheet_url,
            "created spreadsheet"
        );
        Ok(created)
    }

    /// Create a spreadsheet, rename its default tab, and append `values`
    /// to it row-wise. A convenience composition with no logic of its own.
    pub async fn create_and_write(
        &self,
        spreadsheet_title: &str,
        tab_title: &str,
        values: Vec<Vec<CellValue>>,
    ) -> Result<Spreadsheet> {
        let created = self.create_spreadsheet(spreadsheet_title).await?;
        let default_title = created
            .sheets
            .first()
            .map(|s| s.properties.title.clone())
            .unwrap_or_default();
        self.rename_tab(&created, &default_title, tab_title).await?;
        self.write_range(
            &created.spreadsheet_id,
            tab_title,
            MajorDimension::Rows,
            values,
            false,
        )
        .await?;
        Ok(created)
    }

    /// Rename the spreadsheet itself.
    pub async fn rename_spreadsheet(
        &self,
        spreadsheet_id: &str,
        new_title: &str,
    ) -> Result<BatchUpdateResponse> {
        let response = self
            .api
            .batch_update(
                spreadsheet_id,
                BatchUpdateRequest::single(BatchRequest::rename_spreadsheet(new_title)),
            )
            .await?;
        tracing::info!(spreadsheet_id, new_title, "renamed spreadsheet");
        Ok(response)
    }

    // ========================================================================
    // Tab management
    // ========================================================================

    /// Find a tab by exact, case-sensitive title match; first match wins.
    pub fn resolve_tab<'a>(&self, snapshot: &'a Spreadsheet, title: &str) -> Result<&'a Sheet> {
        snapshot
            .sheets
            .iter()
            .find(|sheet| sheet.properties.title == title)
            .ok_or_else(|| SheetsError::TabNotFound {
                title: title.to_string(),
                spreadsheet_id: snapshot.spreadsheet_id.clone(),
            })
    }

    /// Resolve a tab title to its server-assigned id.
    fn resolve_tab_id(&self, snapshot: &Spreadsheet, title: &str) -> Result<i64> {
        let tab = self.resolve_tab(snapshot, title)?;
        tab.properties
            .sheet_id
            .ok_or_else(|| SheetsError::MissingTabId {
                title: title.to_string(),
            })
    }

    /// Add a tab with the given title; the service assigns its id.
    pub async fn insert_tab(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<BatchUpdateResponse> {
        let response = self
            .api
            .batch_update(
                spreadsheet_id,
                BatchUpdateRequest::single(BatchRequest::add_tab(title)),
            )
            .await?;
        tracing::info!(spreadsheet_id, title, "inserted tab");
        Ok(response)
    }

    /// Rename a tab by its id.
    pub async fn rename_tab_by_id(
        &self,
        spreadsheet_id: &str,
        tab_id: i64,
        new_title: &str,
    ) -> Result<BatchUpdateResponse> {
        let response = self
            .api
            .batch_update(
                spreadsheet_id,
                BatchUpdateRequest::single(BatchRequest::rename_tab_by_id(tab_id, new_title)),
            )
            .await?;
        tracing::info!(spreadsheet_id, tab_id, new_title, "renamed tab");
        Ok(response)
    }

    /// Rename a tab by its current title. Resolution happens against the
    /// supplied snapshot; a miss returns `TabNotFound` before any
    /// mutation is issued.
    pub async fn rename_tab(
        &self,
        snapshot: &Spreadsheet,
        old_title: &str,
        new_title: &str,
    ) -> Result<BatchUpdateResponse> {
        let tab_id = self.resolve_tab_id(snapshot, old_title)?;
        self.rename_tab_by_id(&snapshot.spreadsheet_id, tab_id, new_title)
            .await
    }

    /// Delete a tab by its id.
    pub async fn delete_tab_by_id(
        &self,
        spreadsheet_id: &str,
        tab_id: i64,
    ) -> Result<BatchUpdateResponse> {
        let response = self
            .api
            .batch_update(
                spreadsheet_id,
                BatchUpdateRequest::single(BatchRequest::delete_tab_by_id(tab_id)),
            )
            .await?;
        tracing::info!(spreadsheet_id, tab_id, "deleted tab");
        Ok(response)
    }

    /// Delete a tab by title, resolving against the supplied snapshot.
    pub async fn delete_tab_by_name(
        &self,
        snapshot: &Spreadsheet,
        title: &str,
    ) -> Result<BatchUpdateResponse> {
        let tab_id = self.resolve_tab_id(snapshot, title)?;
        self.delete_tab_by_id(&snapshot.spreadsheet_id, tab_id)
            .await
    }

    // ========================================================================
    // Range values
    // ========================================================================

    /// Write `values` into `range`.
    ///
    /// Overwrite mode replaces the addressed cells with the values taken
    /// literally (RAW) and never retries. Append mode inserts after the
    /// existing data with user-entered interpretation, retrying quota
    /// errors under the configured policy.
    pub async fn write_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        major_dimension: MajorDimension,
        values: Vec<Vec<CellValue>>,
        overwrite: bool,
    ) -> Result<WriteResponse> {
        tracing::info!(
            spreadsheet_id,
            range,
            rows = values.len(),
            overwrite,
            "spreadsheet write request"
        );
        let body = ValueRange::with_values(major_dimension, values);

        if overwrite {
            let response = self
                .api
                .update_values(spreadsheet_id, range, body, ValueInputOption::Raw)
                .await?;
            tracing::info!(spreadsheet_id, range, "spreadsheet write succeeded");
            return Ok(WriteResponse::Updated(response));
        }

        let mut attempt: u32 = 0;
        loop {
            match self
                .api
                .append_values(
                    spreadsheet_id,
                    range,
                    body.clone(),
                    ValueInputOption::UserEntered,
                )
                .await
            {
                Ok(response) => {
                    tracing::info!(spreadsheet_id, range, "spreadsheet write succeeded");
                    return Ok(WriteResponse::Appended(response));
                }
                Err(e) if e.is_quota() => {
                    if attempt >= self.retry.max_retries {
                        tracing::warn!(
                            spreadsheet_id,
                            range,
                            attempts = attempt + 1,
                            "quota retry budget exhausted"
                        );
                        return Err(SheetsError::QuotaExhausted {
                            attempts: attempt + 1,
                            source: e,
                        });
                    }
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    tracing::warn!(
                        spreadsheet_id,
                        range,
                        delay_ms = delay.as_millis() as u64,
                        "quota exceeded, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::warn!(spreadsheet_id, range, error = %e, "spreadsheet write failed");
                    return Err(e.into());
                }
            }
        }
    }

    /// Fetch the raw 2-D cells addressed by `range`.
    ///
    /// No pagination: whatever the service returns in one response is
    /// what the caller gets.
    pub async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<CellValue>>> {
        let value_range = self.api.get_values(spreadsheet_id, range).await?;
        Ok(value_range.values)
    }

    /// Clear the cells addressed by `range`.
    pub async fn clear_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ClearValuesResponse> {
        let response = self.api.clear_values(spreadsheet_id, range).await?;
        tracing::info!(spreadsheet_id, range, "cleared range");
        Ok(response)
    }

    // ========================================================================
    // Shaped reads
    // ========================================================================

    /// Fetch a range and flatten it to one row-major sequence.
    pub async fn read_flattened(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<CellValue>> {
        let rows = self.read_range(spreadsheet_id, range).await?;
        Ok(shape::flatten_values(&rows))
    }

    /// Fetch a range of string cells as one flat sequence, optionally
    /// lowercased.
    pub async fn read_strings(
        &self,
        spreadsheet_id: &str,
        range: &str,
        lowercase: bool,
    ) -> Result<Vec<String>> {
        let rows = self.read_range(spreadsheet_id, range).await?;
        shape::flatten_strings(&rows, lowercase)
    }

    /// Fetch a range and group its rows by the cell in `key_col`.
    pub async fn read_grouped(
        &self,
        spreadsheet_id: &str,
        range: &str,
        key_col: usize,
    ) -> Result<IndexMap<GroupKey, Vec<Vec<CellValue>>>> {
        let rows = self.read_range(spreadsheet_id, range).await?;
        shape::group_by_key_column(&rows, key_col)
    }
}

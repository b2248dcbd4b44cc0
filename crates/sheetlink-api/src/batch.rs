//! Batch mutation requests.
//!
//! Structural changes (rename the spreadsheet, add/rename/delete tabs)
//! go through one batched endpoint: an ordered list of tagged operations
//! the service commits as a single transaction. Atomicity is the
//! service's contract, not something enforced here.

use serde::{Deserialize, Serialize};

use crate::types::{SheetProperties, Spreadsheet, SpreadsheetProperties};

/// One atomic mutation within a batch.
///
/// Serializes externally tagged, which is exactly the service's
/// one-key-per-operation JSON: `{"addSheet": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchRequest {
    UpdateSpreadsheetProperties(UpdateSpreadsheetPropertiesRequest),
    AddSheet(AddSheetRequest),
    UpdateSheetProperties(UpdateSheetPropertiesRequest),
    DeleteSheet(DeleteSheetRequest),
}

impl BatchRequest {
    /// Rename the spreadsheet itself. Requests all resulting fields back.
    pub fn rename_spreadsheet(new_title: impl Into<String>) -> Self {
        BatchRequest::UpdateSpreadsheetProperties(UpdateSpreadsheetPropertiesRequest {
            properties: SpreadsheetProperties::titled(new_title),
            fields: "*".to_string(),
        })
    }

    /// Add a tab with the given title; the service assigns its id.
    pub fn add_tab(title: impl Into<String>) -> Self {
        BatchRequest::AddSheet(AddSheetRequest {
            properties: SheetProperties::titled(title),
        })
    }

    /// Rename the tab with the given id. The field mask limits the
    /// update to the title, leaving every other property untouched.
    pub fn rename_tab_by_id(tab_id: i64, new_title: impl Into<String>) -> Self {
        let mut properties = SheetProperties::titled(new_title);
        properties.sheet_id = Some(tab_id);
        BatchRequest::UpdateSheetProperties(UpdateSheetPropertiesRequest {
            properties,
            fields: "title".to_string(),
        })
    }

    /// Delete the tab with the given id.
    pub fn delete_tab_by_id(tab_id: i64) -> Self {
        BatchRequest::DeleteSheet(DeleteSheetRequest { sheet_id: tab_id })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpreadsheetPropertiesRequest {
    pub properties: SpreadsheetProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSheetRequest {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSheetPropertiesRequest {
    pub properties: SheetProperties,
    pub fields: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSheetRequest {
    pub sheet_id: i64,
}

/// An ordered list of mutations submitted as one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub requests: Vec<BatchRequest>,
}

impl BatchUpdateRequest {
    pub fn new(requests: Vec<BatchRequest>) -> Self {
        BatchUpdateRequest { requests }
    }

    /// The common case: a batch of exactly one operation.
    pub fn single(request: BatchRequest) -> Self {
        BatchUpdateRequest {
            requests: vec![request],
        }
    }

    pub fn push(&mut self, request: BatchRequest) {
        self.requests.push(request);
    }
}

/// Per-operation reply within a batch response. Most operations reply
/// with an empty object; add-sheet echoes the created tab's properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchReply {
    pub add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddSheetReply {
    pub properties: SheetProperties,
}

/// Response to a batch submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchUpdateResponse {
    pub spreadsheet_id: String,
    pub replies: Vec<BatchReply>,
    /// Present when the request asked for the updated spreadsheet back.
    pub updated_spreadsheet: Option<Spreadsheet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn rename_spreadsheet_wire_shape() {
        let op = BatchRequest::rename_spreadsheet("Q3 Forecast");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "updateSpreadsheetProperties": {
                    "properties": {"title": "Q3 Forecast"},
                    "fields": "*"
                }
            })
        );
    }

    #[test]
    fn add_tab_wire_shape() {
        let op = BatchRequest::add_tab("Imported");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"addSheet": {"properties": {"title": "Imported"}}})
        );
    }

    #[test]
    fn rename_tab_uses_partial_field_mask() {
        let op = BatchRequest::rename_tab_by_id(42, "Renamed");
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "updateSheetProperties": {
                    "properties": {"sheetId": 42, "title": "Renamed"},
                    "fields": "title"
                }
            })
        );
    }

    #[test]
    fn delete_tab_wire_shape() {
        let op = BatchRequest::delete_tab_by_id(7);
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({"deleteSheet": {"sheetId": 7}})
        );
    }

    #[test]
    fn batch_preserves_operation_order() {
        let mut batch = BatchUpdateRequest::single(BatchRequest::add_tab("A"));
        batch.push(BatchRequest::delete_tab_by_id(1));
        batch.push(BatchRequest::rename_tab_by_id(2, "B"));

        let encoded = serde_json::to_value(&batch).unwrap();
        let requests = encoded["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].get("addSheet").is_some());
        assert!(requests[1].get("deleteSheet").is_some());
        assert!(requests[2].get("updateSheetProperties").is_some());
    }

    #[test]
    fn batch_response_decodes_add_sheet_reply() {
        let response: BatchUpdateResponse = serde_json::from_value(json!({
            "spreadsheetId": "abc123",
            "replies": [
                {"addSheet": {"properties": {"sheetId": 99, "title": "Imported", "index": 2}}},
                {}
            ]
        }))
        .unwrap();
        assert_eq!(response.replies.len(), 2);
        let created = response.replies[0].add_sheet.as_ref().unwrap();
        assert_eq!(created.properties.sheet_id, Some(99));
        assert_eq!(response.replies[1], BatchReply::default());
    }
}

//! JSON wire model for the spreadsheet service.
//!
//! These types mirror the service's resource representations closely
//! enough to serialize straight through serde; fields the service may
//! omit are `Option` or defaulted so partial responses still decode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The value stored in a single cell.
///
/// The service transports cells as untyped JSON scalars; modeling them
/// as an explicit variant means a non-string cell is caught at the
/// boundary instead of via an unchecked downcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean value (TRUE/FALSE)
    Bool(bool),

    /// Numeric value (all numbers transported as f64)
    Number(f64),

    /// String value
    String(String),

    /// Empty cell (JSON null)
    Empty,
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to get the value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(true) => Some(1.0),
            CellValue::Bool(false) => Some(0.0),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Bool(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::String(_) => "string",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

/// Whether a value range is interpreted row-first or column-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    Rows,
    Columns,
}

impl MajorDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            MajorDimension::Rows => "ROWS",
            MajorDimension::Columns => "COLUMNS",
        }
    }
}

impl FromStr for MajorDimension {
    type Err = String;

    /// Case-insensitive: callers tend to hand in "rows" as often as "ROWS".
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ROWS" => Ok(MajorDimension::Rows),
            "COLUMNS" => Ok(MajorDimension::Columns),
            other => Err(format!("unknown major dimension: {other}")),
        }
    }
}

impl fmt::Display for MajorDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the service should interpret written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Store values exactly as given.
    Raw,
    /// Parse values as if typed into the UI (numbers, dates, formulas).
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

/// A named region of cells plus its contents.
///
/// Rows may be ragged: trailing empty cells are absent, not present as
/// nulls, and nothing in this crate assumes rectangularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<MajorDimension>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Vec<CellValue>>,
}

impl ValueRange {
    /// A write body: values plus their major dimension, range left to the URL.
    pub fn with_values(major_dimension: MajorDimension, values: Vec<Vec<CellValue>>) -> Self {
        ValueRange {
            range: None,
            major_dimension: Some(major_dimension),
            values,
        }
    }
}

/// Spreadsheet-level properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadsheetProperties {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
}

impl SpreadsheetProperties {
    pub fn titled(title: impl Into<String>) -> Self {
        SpreadsheetProperties {
            title: title.into(),
        }
    }
}

/// Properties of one tab within a spreadsheet.
///
/// `sheet_id` is server-assigned; it is `None` in requests that create a
/// tab and always populated in snapshots returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i64>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

impl SheetProperties {
    pub fn titled(title: impl Into<String>) -> Self {
        SheetProperties {
            sheet_id: None,
            title: title.into(),
            index: None,
        }
    }
}

/// One tab of a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    #[serde(default)]
    pub properties: SheetProperties,
}

/// A spreadsheet snapshot: identity, properties, and its tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spreadsheet_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SpreadsheetProperties>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sheets: Vec<Sheet>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub spreadsheet_url: String,
}

/// Response to a value update call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: String,
    pub updated_range: String,
    pub updated_rows: u32,
    pub updated_columns: u32,
    pub updated_cells: u32,
}

/// Response to a value append call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppendValuesResponse {
    pub spreadsheet_id: String,
    pub table_range: Option<String>,
    pub updates: Option<UpdateValuesResponse>,
}

/// Response to a clear-values call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClearValuesResponse {
    pub spreadsheet_id: String,
    pub cleared_range: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn cell_value_conversions() {
        assert_eq!(CellValue::from(42), CellValue::Number(42.0));
        assert_eq!(CellValue::from(3.14), CellValue::Number(3.14));
        assert_eq!(CellValue::from(true), CellValue::Bool(true));
        assert_eq!(CellValue::from("hello").as_str(), Some("hello"));
    }

    #[test]
    fn cell_value_decodes_json_scalars() {
        let row: Vec<CellValue> = serde_json::from_value(json!(["a", 1.5, true, null])).unwrap();
        assert_eq!(
            row,
            vec![
                CellValue::String("a".into()),
                CellValue::Number(1.5),
                CellValue::Bool(true),
                CellValue::Empty,
            ]
        );
    }

    #[test]
    fn cell_value_encodes_json_scalars() {
        let row = vec![
            CellValue::String("a".into()),
            CellValue::Number(2.0),
            CellValue::Bool(false),
            CellValue::Empty,
        ];
        assert_eq!(serde_json::to_value(&row).unwrap(), json!(["a", 2.0, false, null]));
    }

    #[test]
    fn major_dimension_parses_case_insensitively() {
        assert_eq!("rows".parse::<MajorDimension>().unwrap(), MajorDimension::Rows);
        assert_eq!("COLUMNS".parse::<MajorDimension>().unwrap(), MajorDimension::Columns);
        assert!("diagonal".parse::<MajorDimension>().is_err());
    }

    #[test]
    fn value_range_serializes_write_body() {
        let body = ValueRange::with_values(
            MajorDimension::Rows,
            vec![vec![CellValue::from("x"), CellValue::from(1)]],
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"majorDimension": "ROWS", "values": [["x", 1.0]]})
        );
    }

    #[test]
    fn value_range_decodes_ragged_rows() {
        let vr: ValueRange = serde_json::from_value(json!({
            "range": "Data!A1:C3",
            "majorDimension": "ROWS",
            "values": [["a", 1.0, 2.0], ["b"], []]
        }))
        .unwrap();
        assert_eq!(vr.values.len(), 3);
        assert_eq!(vr.values[1].len(), 1);
        assert!(vr.values[2].is_empty());
    }

    #[test]
    fn spreadsheet_decodes_snapshot() {
        let ss: Spreadsheet = serde_json::from_value(json!({
            "spreadsheetId": "abc123",
            "properties": {"title": "Budget"},
            "sheets": [
                {"properties": {"sheetId": 0, "title": "Sheet1", "index": 0}},
                {"properties": {"sheetId": 77, "title": "Data", "index": 1}}
            ],
            "spreadsheetUrl": "https://docs.google.com/spreadsheets/d/abc123"
        }))
        .unwrap();
        assert_eq!(ss.sheets[1].properties.sheet_id, Some(77));
        assert_eq!(ss.sheets[1].properties.title, "Data");
    }

    #[test]
    fn add_tab_properties_omit_server_assigned_id() {
        let props = SheetProperties::titled("Imported");
        assert_eq!(serde_json::to_value(&props).unwrap(), json!({"title": "Imported"}));
    }
}

//! Shape conversions for fetched value ranges.
//!
//! The service returns a 2-D, possibly ragged block of cells. These
//! functions reshape it into the three views callers actually want: one
//! flat sequence, a flat string sequence, and rows grouped by a key
//! column. Everything here is pure; nothing touches the network.

use indexmap::IndexMap;

use sheetlink_api::CellValue;

use crate::error::{Result, SheetsError};

/// Flatten rows into a single sequence in row-major order.
///
/// This is deliberately a flatten, not a transpose: callers use it for
/// "all values, row boundaries ignored", and single-column ranges make
/// the two coincide anyway.
pub fn flatten_values(rows: &[Vec<CellValue>]) -> Vec<CellValue> {
    rows.iter().flatten().cloned().collect()
}

/// Flatten rows into strings, failing on the first non-string cell.
///
/// With `lowercase` set, elements are case-folded after flattening;
/// applying the fold twice changes nothing.
pub fn flatten_strings(rows: &[Vec<CellValue>], lowercase: bool) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for row in rows {
        for cell in row {
            match cell {
                CellValue::String(s) => {
                    out.push(if lowercase { s.to_lowercase() } else { s.clone() })
                }
                other => {
                    return Err(SheetsError::TypeMismatch {
                        expected: "string",
                        found: other.type_name(),
                    })
                }
            }
        }
    }
    Ok(out)
}

/// A cell value usable as a grouping key.
///
/// `CellValue` carries `f64` and is therefore not `Eq`; this wrapper
/// defines equality and hashing over a canonical form (0.0 == -0.0,
/// NaNs collapse into one key) so numbers can key a map. Distinct types
/// stay distinct: the number `1` and the string `"1"` are different keys.
#[derive(Debug, Clone)]
pub struct GroupKey(CellValue);

impl GroupKey {
    pub fn value(&self) -> &CellValue {
        &self.0
    }

    fn canonical_bits(n: f64) -> u64 {
        if n.is_nan() {
            f64::NAN.to_bits()
        } else if n == 0.0 {
            0u64
        } else {
            n.to_bits()
        }
    }
}

impl From<CellValue> for GroupKey {
    fn from(v: CellValue) -> Self {
        GroupKey(v)
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey(CellValue::from(s))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (CellValue::Number(a), CellValue::Number(b)) => {
                Self::canonical_bits(*a) == Self::canonical_bits(*b)
            }
            (a, b) => a == b,
        }
    }
}

impl Eq for GroupKey {}

impl std::hash::Hash for GroupKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match &self.0 {
            CellValue::Empty => 0u8.hash(state),
            CellValue::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Number(n) => {
                2u8.hash(state);
                Self::canonical_bits(*n).hash(state);
            }
            CellValue::String(s) => {
                3u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group rows by the cell at `key_col`.
///
/// The key cell is elided from each stored row; the other cells keep
/// their order. Rows sharing a key accumulate in input order, and keys
/// appear in first-seen order. Fails with `IndexOutOfRange` on the
/// first row shorter than `key_col + 1`.
pub fn group_by_key_column(
    rows: &[Vec<CellValue>],
    key_col: usize,
) -> Result<IndexMap<GroupKey, Vec<Vec<CellValue>>>> {
    let mut groups: IndexMap<GroupKey, Vec<Vec<CellValue>>> = IndexMap::new();
    for (row_index, row) in rows.iter().enumerate() {
        if key_col >= row.len() {
            return Err(SheetsError::IndexOutOfRange {
                index: key_col,
                row: row_index,
                row_len: row.len(),
            });
        }
        let key = GroupKey(row[key_col].clone());
        let rest: Vec<CellValue> = row
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_col)
            .map(|(_, cell)| cell.clone())
            .collect();
        groups.entry(key).or_default().push(rest);
    }
    Ok(groups)
}

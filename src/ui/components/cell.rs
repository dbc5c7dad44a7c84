//! Cell values and row identity for the data table.
//!
//! Every cell is reduced to a [`CellValue`] by its column accessor. The value
//! keeps track of the difference between a missing field ([`CellValue::Undefined`])
//! and an explicit null ([`CellValue::Null`]) because the two render
//! differently even though they sort the same way.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// Text shown in place of a missing value.
pub const MISSING_PLACEHOLDER: &str = "-";

/// Unique identifier of a table row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowId {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(id) => write!(f, "{}", id),
            RowId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        RowId::Int(id)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        RowId::Text(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        RowId::Text(id)
    }
}

/// A record that can be displayed as a table row.
pub trait TableRow {
    /// The unique identifier of this row.
    fn row_id(&self) -> RowId;
}

/// The value of a single cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// The row has no such field.
    #[default]
    Undefined,
    /// The field is present but explicitly null.
    Null,
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A text value.
    Text(String),
}

impl CellValue {
    /// Whether the field is missing from the row.
    pub fn is_undefined(&self) -> bool {
        matches!(self, CellValue::Undefined)
    }

    /// The key used when sorting by this value.
    ///
    /// Missing and null values both compare as the empty string.
    pub fn sort_key(&self) -> Cow<'_, str> {
        match self {
            CellValue::Undefined | CellValue::Null => Cow::Borrowed(""),
            CellValue::Text(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// The text displayed in the table cell.
    ///
    /// Only a missing value is replaced by the placeholder dash. A null value
    /// renders as the literal text `null`.
    pub fn cell_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Undefined => Cow::Borrowed(MISSING_PLACEHOLDER),
            CellValue::Text(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Undefined => f.write_str("undefined"),
            CellValue::Null => f.write_str("null"),
            CellValue::Bool(value) => write!(f, "{}", value),
            CellValue::Int(value) => write!(f, "{}", value),
            CellValue::Float(value) => f.write_str(&format_float(*value)),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Format a float the way a number is printed as text: integral values
/// without a fraction, named non-finite values, and exponent notation for
/// magnitudes of `1e21` and above or below `1e-6`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value == 0.0 {
        // Covers negative zero.
        "0".to_string()
    } else {
        let magnitude = value.abs();
        if (1e-6..1e21).contains(&magnitude) {
            value.to_string()
        } else {
            exponent_form(value)
        }
    }
}

/// `1e21` as `"1e+21"`, `1.5e-7` as `"1.5e-7"`.
fn exponent_form(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    /// `None` is treated as an explicit null.
    fn from(value: Option<V>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(int) => CellValue::Int(int),
                None => n.as_f64().map_or(CellValue::Null, CellValue::Float),
            },
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(items) => CellValue::Text(
                items
                    .iter()
                    .map(|item| match CellValue::from(item) {
                        CellValue::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Value::Object(_) => CellValue::Text("[object Object]".to_string()),
        }
    }
}

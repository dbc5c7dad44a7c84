//! Rows for the demo table.
//!
//! Records are loaded from a JSON array of objects. Each object needs an
//! `id` that is an integer or a string; every other key becomes a column.
//! Keys are kept in the order they first appear.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::ui::{CellValue, Column, RowId, TableRow};

/// A row loaded from JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RowId,
    fields: Map<String, Value>,
}

impl Record {
    /// Create a record from its id and fields. The `id` field is kept as is.
    pub fn new(id: RowId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// The value of `key`, or `Undefined` if the record has no such field.
    pub fn field(&self, key: &str) -> CellValue {
        self.fields
            .get(key)
            .map_or(CellValue::Undefined, CellValue::from)
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl TableRow for Record {
    fn row_id(&self) -> RowId {
        self.id.clone()
    }
}

/// Parse records from JSON text.
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let Value::Array(items) = serde_json::from_str::<Value>(json)? else {
        return Err(AppError::data("expected a JSON array of objects"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(fields) = item else {
                return Err(AppError::data(format!("row {} is not an object", index)));
            };
            let id = match fields.get("id") {
                Some(Value::Number(n)) => n.as_i64().map(RowId::Int).ok_or_else(|| {
                    AppError::data(format!("row {} has a non-integer numeric id", index))
                })?,
                Some(Value::String(s)) => RowId::Text(s.clone()),
                _ => {
                    return Err(AppError::data(format!(
                        "row {} has no integer or string \"id\"",
                        index
                    )))
                }
            };
            Ok(Record::new(id, fields))
        })
        .collect()
}

/// Load records from a JSON file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let contents = fs::read_to_string(path)?;
    let records = parse_records(&contents)?;
    debug!(path = %path.display(), count = records.len(), "Loaded records");
    Ok(records)
}

/// Build one column per field key, in first-seen order across all rows.
pub fn columns_for(
    records: &[Rc<Record>],
    is_sortable: impl Fn(&str) -> bool,
) -> Vec<Column<Record>> {
    let mut keys: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }

    keys.into_iter()
        .map(|key| {
            let sortable = is_sortable(&key);
            let field = key.clone();
            Column::new(key.clone(), title_case(&key), move |record: &Record| {
                record.field(&field)
            })
            .sortable(sortable)
        })
        .collect()
}

/// `"first_name"` becomes `"First Name"`; `"id"` becomes `"ID"`.
fn title_case(key: &str) -> String {
    if key.eq_ignore_ascii_case("id") {
        return "ID".to_string();
    }
    key.split(|c: char| c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Built-in rows used when no data file is given.
///
/// Dmitri has no `age` and Carla's `team` is null, so both placeholder
/// cases are visible. Ages include 9 and 102 to show textual sorting.
pub fn sample_records() -> Vec<Record> {
    let rows: [(i64, &str, &str, Option<i64>, Option<&str>); 6] = [
        (1, "Bob", "Engineer", Some(34), Some("Platform")),
        (2, "Al", "Designer", Some(9), Some("Web")),
        (3, "Carla", "Manager", Some(41), None),
        (4, "Dmitri", "Engineer", None, Some("Platform")),
        (5, "Eve", "Security", Some(102), Some("Infra")),
        (6, "Bob", "Support", Some(27), Some("Web")),
    ];

    rows.into_iter()
        .map(|(id, name, role, age, team)| {
            let mut fields = Map::new();
            fields.insert("id".to_string(), Value::from(id));
            fields.insert("name".to_string(), Value::from(name));
            fields.insert("role".to_string(), Value::from(role));
            if let Some(age) = age {
                fields.insert("age".to_string(), Value::from(age));
            }
            fields.insert(
                "team".to_string(),
                team.map_or(Value::Null, Value::from),
            );
            Record::new(RowId::Int(id), fields)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_records() {
        let records = parse_records(r#"[{"id": 1, "name": "Bob"}, {"id": "x", "name": null}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_id(), RowId::Int(1));
        assert_eq!(records[1].row_id(), RowId::Text("x".to_string()));
        assert_eq!(records[1].field("name"), CellValue::Null);
        assert_eq!(records[1].field("age"), CellValue::Undefined);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_records(r#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }

    #[test]
    fn test_parse_rejects_missing_id() {
        let err = parse_records(r#"[{"id": 1}, {"name": "no id"}]"#).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(matches!(parse_records("[{"), Err(AppError::Json(_))));
    }

    #[test]
    fn test_load_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 7, "city": "Oslo"}}]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records[0].field("city"), CellValue::Text("Oslo".to_string()));
    }

    #[test]
    fn test_columns_follow_first_seen_key_order() {
        let records: Vec<Rc<Record>> = parse_records(
            r#"[{"id": 1, "zeta": 1, "alpha": 2}, {"id": 2, "beta": 3, "alpha": 4}]"#,
        )
        .unwrap()
        .into_iter()
        .map(Rc::new)
        .collect();

        let columns = columns_for(&records, |key| key != "id");
        let keys: Vec<&str> = columns.iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["id", "zeta", "alpha", "beta"]);
        assert!(!columns[0].is_sortable());
        assert!(columns[1].is_sortable());
        assert_eq!(columns[3].value(&records[0]), CellValue::Undefined);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("id"), "ID");
        assert_eq!(title_case("first_name"), "First Name");
        assert_eq!(title_case("team"), "Team");
    }

    #[test]
    fn test_sample_records_show_missing_and_null() {
        let records = sample_records();
        assert_eq!(records.len(), 6);
        let dmitri = &records[3];
        assert_eq!(dmitri.field("age"), CellValue::Undefined);
        assert_eq!(dmitri.field("age").cell_text(), "-");

        let carla = &records[2];
        assert_eq!(carla.field("team"), CellValue::Null);
        assert_eq!(carla.field("team").cell_text(), "null");
    }
}

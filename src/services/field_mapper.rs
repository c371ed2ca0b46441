//! Field mapping service.
//!
//! Turns a CSV [`Row`] into the mapped part of an issue's `fields` object,
//! driven entirely by the [`FieldMap`] rule table.

use serde_json::{Map, Value};

use crate::domain::errors::DomainResult;
use crate::domain::models::{Document, FieldMap, FieldRule, Row};

/// Maps rows to Jira fields using a fixed rule table.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    field_map: FieldMap,
}

impl FieldMapper {
    pub fn new(field_map: FieldMap) -> Self {
        Self { field_map }
    }

    /// Produce the mapped fields for `row`.
    ///
    /// Missing columns read as empty. A blank summary is left out so Jira
    /// reports it as missing instead of receiving an empty string.
    pub fn map_row(&self, row: &Row) -> DomainResult<Map<String, Value>> {
        let mut fields = Map::new();

        for entry in self.field_map.entries() {
            let value = row.get(&entry.column).trim();

            let mapped = match entry.rule {
                FieldRule::Summary if value.is_empty() => continue,
                FieldRule::Labels => Value::from(parse_labels(value)),
                FieldRule::Description => serde_json::to_value(Document::from_plain_text(value))?,
                FieldRule::CustomList => {
                    if value.is_empty() {
                        Value::Array(vec![])
                    } else {
                        Value::Array(vec![Value::from(value)])
                    }
                }
                FieldRule::Summary | FieldRule::CustomText | FieldRule::Text => Value::from(value),
            };

            fields.insert(entry.field.clone(), mapped);
        }

        Ok(fields)
    }
}

/// Split a comma-separated label cell.
///
/// Pieces are trimmed and blanks dropped; order and duplicates are kept.
pub fn parse_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

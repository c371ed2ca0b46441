//! Column-to-field mapping and the rule table that drives the mapper.

use serde::{Deserialize, Serialize};

/// Prefix Jira uses for instance-specific field ids.
pub const CUSTOM_FIELD_PREFIX: &str = "customfield_";

/// How a cell value is turned into a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRule {
    /// Trimmed string, omitted entirely when blank.
    Summary,
    /// Comma-separated list of labels.
    Labels,
    /// Plain text converted to an ADF document.
    Description,
    /// Custom field taking a plain string.
    CustomText,
    /// Custom field taking a list of strings (e.g. multi-select by value).
    CustomList,
    /// Any other field: trimmed string.
    Text,
}

impl FieldRule {
    /// Derive the rule for a target field id.
    ///
    /// `list_fields` names the custom fields that expect a list value.
    pub fn classify(field: &str, list_fields: &[String]) -> Self {
        match field {
            "summary" => Self::Summary,
            "labels" => Self::Labels,
            "description" => Self::Description,
            f if f.starts_with(CUSTOM_FIELD_PREFIX) => {
                if list_fields.iter().any(|l| l == f) {
                    Self::CustomList
                } else {
                    Self::CustomText
                }
            }
            _ => Self::Text,
        }
    }
}

/// One configured mapping as it appears in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// CSV header name.
    pub column: String,
    /// Jira field id (`summary`, `labels`, `customfield_10042`, ...).
    pub field: String,
    /// Explicit rule; derived from `field` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<FieldRule>,
}

impl FieldMapping {
    pub fn new(column: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            field: field.into(),
            rule: None,
        }
    }
}

/// Mappings used when the configuration does not provide any.
pub fn default_field_mappings() -> Vec<FieldMapping> {
    vec![
        FieldMapping::new("Summary", "summary"),
        FieldMapping::new("Labels", "labels"),
        FieldMapping::new("Description", "description"),
    ]
}

/// A mapping with its rule resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapEntry {
    pub column: String,
    pub field: String,
    pub rule: FieldRule,
}

/// Immutable rule table built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<FieldMapEntry>,
}

impl FieldMap {
    /// Resolve every mapping's rule, keeping configuration order.
    pub fn resolve(mappings: &[FieldMapping], list_fields: &[String]) -> Self {
        let entries = mappings
            .iter()
            .map(|m| FieldMapEntry {
                column: m.column.clone(),
                field: m.field.clone(),
                rule: m
                    .rule
                    .unwrap_or_else(|| FieldRule::classify(&m.field, list_fields)),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[FieldMapEntry] {
        &self.entries
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self::resolve(&default_field_mappings(), &[])
    }
}

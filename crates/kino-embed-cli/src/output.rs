//! Output formatting for CLI

use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

/// One row of a key/value listing
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Field {
    pub field: String,
    pub value: String,
}

impl Field {
    pub fn new(field: impl Into<String>, value: impl ToString) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

/// Render key/value fields in the selected format
pub fn format_fields(fields: &[Field], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|f| (f.field.clone(), serde_json::Value::from(f.value.clone())))
                .collect();
            serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
        }
        OutputFormat::Table => Table::new(fields).with(Style::rounded()).to_string(),
        OutputFormat::Text => {
            let width = fields.iter().map(|f| f.field.len()).max().unwrap_or(0);
            fields
                .iter()
                .map(|f| format!("  {:width$}  {}", f.field, f.value, width = width))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

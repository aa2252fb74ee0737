//! Report-level metadata extracted from preamble lines.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single metadata value. Misses are represented as [`MetadataValue::Null`],
/// never as errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    Date(NaiveDate),
    Text(String),
    #[default]
    Null,
}

impl MetadataValue {
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Text(text) => f.write_str(text),
            Self::Null => f.write_str("unknown"),
        }
    }
}

/// Named metadata of one load, identical for every row of the resulting table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    values: BTreeMap<String, MetadataValue>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.values.insert(key.into(), value);
    }

    /// Value for `key`; unknown keys read as null.
    #[must_use]
    pub fn get(&self, key: &str) -> &MetadataValue {
        static NULL: MetadataValue = MetadataValue::Null;
        self.values.get(key).unwrap_or(&NULL)
    }

    #[must_use]
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        self.get(key).as_date()
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).as_text()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys whose value could not be found or parsed.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, value)| value.is_null())
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

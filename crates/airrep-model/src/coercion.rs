//! Bookkeeping for values that were defaulted during type coercion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result classification of coercing one raw cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionOutcome {
    /// The value parsed.
    Parsed,
    /// The cell was blank; the fallback was used.
    Missing,
    /// The cell had content that could not be parsed; the fallback was used.
    Invalid,
}

/// Per-field counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCoercion {
    pub parsed: usize,
    pub missing: usize,
    pub invalid: usize,
}

impl FieldCoercion {
    #[must_use]
    pub fn defaulted(&self) -> usize {
        self.missing + self.invalid
    }
}

/// Coercion counters of one load, keyed by canonical field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionReport {
    fields: BTreeMap<String, FieldCoercion>,
}

impl CoercionReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: &str, outcome: CoercionOutcome) {
        let entry = self.fields.entry(field.to_string()).or_default();
        match outcome {
            CoercionOutcome::Parsed => entry.parsed += 1,
            CoercionOutcome::Missing => entry.missing += 1,
            CoercionOutcome::Invalid => entry.invalid += 1,
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> FieldCoercion {
        self.fields.get(name).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldCoercion)> {
        self.fields.iter().map(|(name, counts)| (name.as_str(), counts))
    }

    /// Total number of non-blank values that failed to parse.
    #[must_use]
    pub fn total_invalid(&self) -> usize {
        self.fields.values().map(|counts| counts.invalid).sum()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total_invalid() == 0
    }
}

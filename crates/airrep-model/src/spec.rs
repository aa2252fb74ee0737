//! Declarative report specifications.
//!
//! A [`ReportSpec`] captures every positional and vocabulary rule of one
//! export format so the pipeline itself carries no per-report literals.
//! All specs are `static` values defined in [`crate::catalog`].

use crate::kind::ReportKind;

/// How raw header text is cased before the rename table is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCase {
    /// Keep the cleaned header as-is.
    Preserve,
    /// Lower-case and replace spaces with underscores.
    Snake,
}

/// When the trailing summary rows are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailerStage {
    /// Directly from the parsed delimited body.
    Body,
    /// After rows with blank required values were filtered out.
    AfterRowFilter,
}

/// Logical type of a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Float,
    Date,
}

impl FieldType {
    /// Numeric fields never hold nulls; failures fall back to zero.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Cleaning applied to a numeric field's raw text before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericRule {
    /// Strip thousands separators and whitespace.
    Plain,
    /// Strip thousands separators, then every character outside `[0-9.-]`.
    Amount,
    /// Take the first run of ASCII digits (`"3 pax"` → 3).
    DigitRun,
}

/// Whether a field must exist in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Absent column fails the load.
    Required,
    /// Absent column is created with the type's fallback value.
    Optional,
}

/// One canonical output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub numeric_rule: NumericRule,
    pub presence: Presence,
    /// Rows whose value is blank (or, for numeric fields, unparseable) are dropped.
    pub drop_blank_rows: bool,
    /// Remove embedded newlines from text values.
    pub strip_newlines: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, field_type: FieldType, numeric_rule: NumericRule) -> Self {
        Self {
            name,
            field_type,
            numeric_rule,
            presence: Presence::Optional,
            drop_blank_rows: false,
            strip_newlines: false,
        }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldType::Text, NumericRule::Plain)
    }

    pub const fn integer(name: &'static str, rule: NumericRule) -> Self {
        Self::new(name, FieldType::Integer, rule)
    }

    pub const fn float(name: &'static str, rule: NumericRule) -> Self {
        Self::new(name, FieldType::Float, rule)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldType::Date, NumericRule::Plain)
    }

    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            presence: Presence::Required,
            ..self
        }
    }

    #[must_use]
    pub const fn drop_blank_rows(self) -> Self {
        Self {
            drop_blank_rows: true,
            ..self
        }
    }

    #[must_use]
    pub const fn strip_newlines(self) -> Self {
        Self {
            strip_newlines: true,
            ..self
        }
    }
}

/// How a metadata value is read from a matching preamble line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataExtract {
    /// First `d/m/yyyy`-shaped token, parsed day-first.
    DayFirstDate,
    /// Text after the last `:`, cut at the first `,`.
    ColonValue,
}

/// A labeled value searched for in the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataRule {
    /// Metadata key (`from_date`, `report_year`, ...).
    pub key: &'static str,
    /// Substring identifying the line carrying the value.
    pub label: &'static str,
    pub extract: MetadataExtract,
    /// Column the value is broadcast into.
    pub column: &'static str,
}

/// Fields computed after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedRule {
    /// `target = minuend - subtrahend`, computed only when the source lacks `target`.
    Difference {
        target: &'static str,
        minuend: &'static str,
        subtrahend: &'static str,
    },
    /// `target = numerator / denominator * 100`, zero when the denominator is not positive.
    Percentage {
        target: &'static str,
        numerator: &'static str,
        denominator: &'static str,
    },
    /// Split `source` at `separator` into two integer columns and drop `source`.
    SplitPair {
        source: &'static str,
        first: &'static str,
        second: &'static str,
        separator: char,
    },
}

impl DerivedRule {
    /// Columns produced by the rule.
    #[must_use]
    pub fn targets(&self) -> Vec<&'static str> {
        match self {
            Self::Difference { target, .. } | Self::Percentage { target, .. } => vec![*target],
            Self::SplitPair { first, second, .. } => vec![*first, *second],
        }
    }
}

/// Folding of row groups into one record per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsolidationSpec {
    /// Identifying columns, forward-filled before grouping.
    pub key: &'static [&'static str],
    /// Column whose values are joined per entity.
    pub child: &'static str,
    pub separator: &'static str,
}

/// Immutable per-kind configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSpec {
    pub kind: ReportKind,
    /// Lines before the header row.
    pub preamble_lines: usize,
    /// Leading preamble lines scanned for metadata.
    pub metadata_lines: usize,
    /// Trailing summary rows to drop.
    pub trailer_rows: usize,
    pub trailer_stage: TrailerStage,
    pub header_case: HeaderCase,
    /// Exact-match rename table keyed on cleaned (and cased) header text.
    pub renames: &'static [(&'static str, &'static str)],
    /// Canonical fields in output order.
    pub fields: &'static [FieldSpec],
    /// Keep unmapped source columns after the canonical ones.
    pub passthrough: bool,
    pub metadata: &'static [MetadataRule],
    pub derived: &'static [DerivedRule],
    pub consolidation: Option<ConsolidationSpec>,
    /// Write a `<stem>_processed.csv` copy to the output directory.
    pub persist_processed: bool,
}

impl ReportSpec {
    /// Look up a canonical field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Canonical column names in output order, metadata columns last.
    #[must_use]
    pub fn canonical_columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = self.fields.iter().map(|field| field.name).collect();
        for rule in self.metadata {
            if !columns.contains(&rule.column) {
                columns.push(rule.column);
            }
        }
        columns
    }

    /// Canonical name for a cleaned header, if the rename table maps it.
    #[must_use]
    pub fn rename_for(&self, header: &str) -> Option<&'static str> {
        self.renames
            .iter()
            .find(|(raw, _)| *raw == header)
            .map(|(_, canonical)| *canonical)
    }

    /// True if `name` is produced by a derived-field rule.
    #[must_use]
    pub fn is_derived(&self, name: &str) -> bool {
        self.derived.iter().any(|rule| rule.targets().contains(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_modifiers_compose() {
        const FIELD: FieldSpec = FieldSpec::float("net_amount", NumericRule::Plain)
            .required()
            .drop_blank_rows();
        assert_eq!(FIELD.presence, Presence::Required);
        assert!(FIELD.drop_blank_rows);
        assert!(!FIELD.strip_newlines);
        assert_eq!(FIELD.field_type, FieldType::Float);
    }

    #[test]
    fn derived_targets() {
        let split = DerivedRule::SplitPair {
            source: "booked_load",
            first: "adult_booked",
            second: "infant_booked",
            separator: '\\',
        };
        assert_eq!(split.targets(), vec!["adult_booked", "infant_booked"]);
    }
}

//! Report table transformation.
//!
//! Turns the raw string body of an export into a canonical table:
//!
//! - [`ColumnNormalizer`]: clean headers, apply the rename table, drop empty columns
//! - [`FieldCoercer`]: typed numeric and date columns via [`parse_or_default`]
//! - [`DerivedFieldComputer`]: seats sold, load factor, percentages, split counts
//! - [`RecordConsolidator`]: forward-fill identifiers and fold child rows
//! - [`project_canonical`]: final column order and fallback columns
//!
//! All steps are driven by the kind's [`airrep_model::ReportSpec`]; none of
//! them carry per-report literals.

mod canonical;
mod coerce;
mod columns;
mod consolidate;
mod derive;
mod error;
mod frame;
mod frame_utils;

pub use canonical::{broadcast_metadata, project_canonical};
pub use coerce::{Coerced, CoercedValue, FieldCoercer, clean_numeric, parse_or_default};
pub use columns::{ColumnNormalizer, clean_header};
pub use consolidate::{Entity, RecordConsolidator, fold_entities, forward_fill};
pub use derive::{DerivedFieldComputer, percentage, split_pair};
pub use error::{Result, TransformError};
pub use frame::{PROCESSED_SUFFIX, ReportFrame, processed_file_name};
pub use frame_utils::drop_trailing_rows;

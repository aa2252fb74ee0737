//! Shared model types for airline report normalization.
//!
//! This crate holds everything that is configuration rather than data:
//!
//! - **Report kinds**: the seven back-office exports the pipeline understands
//! - **Report specifications**: one immutable [`ReportSpec`] per kind describing
//!   preamble/trailer sizes, header rename tables, typed fields, metadata
//!   patterns, derived-field rules and consolidation keys
//! - **Value types**: report metadata and coercion bookkeeping that travel
//!   with every normalized table

pub mod catalog;
pub mod coercion;
pub mod error;
pub mod kind;
pub mod metadata;
pub mod spec;

pub use coercion::{CoercionOutcome, CoercionReport, FieldCoercion};
pub use error::ModelError;
pub use kind::ReportKind;
pub use metadata::{MetadataValue, ReportMetadata};
pub use spec::{
    ConsolidationSpec, DerivedRule, FieldSpec, FieldType, HeaderCase, MetadataExtract,
    MetadataRule, NumericRule, Presence, ReportSpec, TrailerStage,
};

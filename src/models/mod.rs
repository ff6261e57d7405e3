//! Data model shared by every stage of the validation pipeline.
//!
//! - [`SchemaItem`] / [`Value`]: the format-agnostic shape all three parsers produce
//! - [`ValidationResult`]: the outcome of validating one item
//! - [`ValidationReport`]: the aggregated outcome for one document or URL

mod item;
mod result;

pub use item::{Encoding, SchemaItem, SourceLocation, Value};
pub use result::{
    BatchReport, RichSnippetOpportunity, ValidationMode, ValidationReport, ValidationResult,
};

//! Render options: the parameters describing a screenshot.
//!
//! This module provides:
//! - The ordered option mapping ([`RenderOptions`], [`OptionValue`])
//! - Validation and normalization ([`process`], [`ProcessedOptions`])
//! - Validation errors ([`ValidationError`])
//!
//! # Query Encoding
//!
//! The URL-encoded form is signed, so it must be byte-for-byte stable:
//! keys keep insertion order and a defaulted `format` goes last. Sequence
//! values contribute only their final element to the query string; JSON
//! bodies carry the whole sequence.

mod error;
mod processor;
mod value;

#[cfg(test)]
mod value_tests;

pub use error::ValidationError;
pub use processor::{ProcessedOptions, process};
pub use value::{OptionValue, RenderOptions};

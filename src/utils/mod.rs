//! Shared helpers.
//!
//! This module provides:
//! - CSS selector and regex construction for compile-time constant patterns
//! - Text helpers (byte-bounded truncation, whitespace collapsing, local names)
//! - URL validation and normalization

mod selector;
pub mod text;
pub mod url;

pub use selector::{compile_regex_unsafe, parse_selector_unsafe};

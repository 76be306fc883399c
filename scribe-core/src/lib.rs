//! Core utilities and types for the Scribe generator.
//!
//! This crate provides the identifier naming styles and file output helpers
//! shared across the Scribe crates.

mod file;
pub mod naming;

// File operations
pub use file::{File, write_atomic};
// Naming styles
pub use naming::{
    NamingStyle, split_words, to_camel_case, to_pascal_case, to_screaming_snake_case,
    to_snake_case,
};

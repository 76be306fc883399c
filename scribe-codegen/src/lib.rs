//! Generation pipeline for the Scribe model-driven generator.
//!
//! A run renders the targets of a bundle against a model:
//!
//! ```text
//! TargetDefinition ─build_target─▶ Target ─Generator─▶ TemplateEngine ─▶ file + Ledger
//!                                                           │
//!                                     generator.generate(…) ┘ (embedded, same Ledger)
//! ```
//!
//! # Module Organization
//!
//! - [`generation`] - Target resolution, the [`Generator`](generation::Generator), the run ledger and the embedded generator
//! - [`engine`] - The [`TemplateEngine`](engine::TemplateEngine) trait, render context and MiniJinja engine
//! - [`mappers`] - Database type/name mapping and C# helpers
//! - [`builder`] - Indentation-aware line building

pub mod builder;
pub mod engine;
mod error;
pub mod generation;
pub mod mappers;

pub use error::{Error, ErrorKind, Result};

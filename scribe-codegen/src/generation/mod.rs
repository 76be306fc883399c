//! Generation pipeline: target resolution, rendering and the run ledger.
//!
//! - [`RuntimeConfig`] - Paths, variables and dialect settings of a run
//! - [`build_target`] - Resolves a [`TargetDefinition`](scribe_manifest::TargetDefinition) into a [`Target`]
//! - [`Generator`] - Renders targets for their entity scope
//! - [`Ledger`] - Targets produced so far, shared with embedded generations
//! - [`EmbeddedGenerator`] - Template-triggered generation of another target

mod config;
mod embedded;
mod generator;
mod ledger;
mod target;

pub use config::RuntimeConfig;
pub use embedded::EmbeddedGenerator;
pub use generator::Generator;
pub use ledger::{Ledger, Reservation};
pub use target::{Target, build_target};

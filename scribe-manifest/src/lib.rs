// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod profile;

pub use error::{Error, Result, SourceContext};
pub use manifest::*;
pub use profile::DialectProfile;

//! Code generation building blocks.
//!
//! - [`LinesBuilder`] - Lines with indentation levels, rendered at the end
//! - [`Indent`] - Indentation configuration

mod indent;
mod lines;

pub use indent::Indent;
pub use lines::LinesBuilder;

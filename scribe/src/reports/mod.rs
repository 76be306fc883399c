//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod list;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateReport, GeneratedFile, TargetFailure};
pub use list::{BundleInfo, ListReport, TargetInfo};
pub use output::{Report, TerminalOutput};

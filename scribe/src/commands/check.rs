use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use scribe_manifest::ScribeToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to scribe.toml (defaults to ./scribe.toml)
    #[arg(short, long, default_value = "scribe.toml")]
    pub config: PathBuf,

    /// Path to the model document
    #[arg(short, long, default_value = "model.toml")]
    pub model: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let scribe_toml = ScribeToml::open(&self.config).unwrap_or_exit();

        let report = ops::check(&scribe_toml, &self.model);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}

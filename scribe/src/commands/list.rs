use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use scribe_manifest::ScribeToml;
use scribe_model::Model;
use tracing::debug;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    /// Path to scribe.toml (defaults to ./scribe.toml)
    #[arg(short, long, default_value = "scribe.toml")]
    pub config: PathBuf,

    /// Path to the model document
    #[arg(short, long, default_value = "model.toml")]
    pub model: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let scribe_toml = ScribeToml::open(&self.config).unwrap_or_exit();
        let model = match Model::from_file(&self.model) {
            Ok(model) => Some(model),
            Err(err) => {
                debug!(model = %self.model.display(), error = %err, "model not listed");
                None
            }
        };

        let report = ops::list(scribe_toml.manifest(), model.as_ref());
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}

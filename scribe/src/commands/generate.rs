use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result, bail};
use scribe_manifest::ScribeToml;
use scribe_model::Model;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to scribe.toml (defaults to ./scribe.toml)
    #[arg(short, long, default_value = "scribe.toml")]
    pub config: PathBuf,

    /// Path to the model document
    #[arg(short, long, default_value = "model.toml")]
    pub model: PathBuf,

    /// Bundle to generate
    #[arg(short, long)]
    pub bundle: String,

    /// Entity to generate for (repeatable, defaults to every entity)
    #[arg(short, long = "entity", value_name = "ENTITY")]
    pub entities: Vec<String>,

    /// Continue with the next target after a failure
    #[arg(long)]
    pub keep_going: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let scribe_toml = ScribeToml::open(&self.config).unwrap_or_exit();
        let bundle = scribe_toml.manifest().bundle(&self.bundle).unwrap_or_exit();
        let model = Model::from_file(&self.model)
            .wrap_err_with(|| format!("failed to load model '{}'", self.model.display()))?;

        let opts = GenerateOptions {
            bundle: &self.bundle,
            entities: &self.entities,
            keep_going: self.keep_going,
        };
        let report = ops::generate(&scribe_toml, bundle, model, opts)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            bail!("{} target(s) failed", report.failures.len());
        }
        Ok(())
    }
}

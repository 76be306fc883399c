//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    pub project: String,
    pub bundle: String,
    /// Folder receiving generated files.
    pub destination: PathBuf,
    /// Entities selected for the run, in order.
    pub entities: Vec<String>,
    /// Generated files in invocation order, embedded targets included.
    pub generated: Vec<GeneratedFile>,
    /// Target definitions that failed (only with `--keep-going`).
    pub failures: Vec<TargetFailure>,
}

#[derive(Debug)]
pub struct GeneratedFile {
    pub target: String,
    pub entity: Option<String>,
    /// Path relative to the destination folder.
    pub path: String,
}

#[derive(Debug)]
pub struct TargetFailure {
    pub target: String,
    pub message: String,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&format!("{} / {}", self.project, self.bundle));
        out.key_value("Destination", &self.destination.display().to_string());
        out.key_value("Entities", &self.entities.join(", "));
        out.newline();

        out.section(&format!("Generated ({})", self.generated.len()));
        for file in &self.generated {
            match &file.entity {
                Some(entity) => {
                    out.added_item(&format!("{} [{}: {}]", file.path, file.target, entity))
                }
                None => out.added_item(&format!("{} [{}]", file.path, file.target)),
            }
        }

        if !self.failures.is_empty() {
            out.newline();
            for failure in &self.failures {
                out.warning(&format!(
                    "error: target '{}': {}",
                    failure.target, failure.message
                ));
            }
        }
    }
}

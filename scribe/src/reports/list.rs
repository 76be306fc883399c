//! List command report data structures.

use super::output::{Output, Report};

#[derive(Debug)]
pub struct ListReport {
    pub project: String,
    pub bundles: Vec<BundleInfo>,
    /// Model entities, when the model could be loaded.
    pub entities: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct BundleInfo {
    pub name: String,
    pub description: Option<String>,
    pub targets: Vec<TargetInfo>,
}

#[derive(Debug)]
pub struct TargetInfo {
    pub name: String,
    pub scope: String,
    /// `folder/file` pattern, unresolved
    pub path: String,
    pub template: String,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        out.title(&self.project);
        out.section("Bundles");
        for bundle in &self.bundles {
            match &bundle.description {
                Some(desc) => out.preformatted(&format!("  {} - {}", bundle.name, desc)),
                None => out.preformatted(&format!("  {}", bundle.name)),
            }
            for target in &bundle.targets {
                out.preformatted(&format!(
                    "    [{}] {} -> {} ({})",
                    target.scope, target.name, target.path, target.template
                ));
            }
        }

        if let Some(entities) = &self.entities {
            out.newline();
            out.section("Entities");
            for entity in entities {
                out.list_item(entity);
            }
        }
    }
}

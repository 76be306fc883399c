//! List operation - bundles, targets and entities.

use scribe_manifest::Manifest;
use scribe_model::Model;

use crate::reports::{BundleInfo, ListReport, TargetInfo};

/// Execute the list operation.
///
/// `model` is optional: entities are listed only when the model could be
/// loaded.
pub fn list(manifest: &Manifest, model: Option<&Model>) -> ListReport {
    let bundles = manifest
        .bundles
        .iter()
        .map(|(name, bundle)| BundleInfo {
            name: name.clone(),
            description: bundle.description.clone(),
            targets: bundle
                .targets
                .iter()
                .map(|t| TargetInfo {
                    name: t.name.clone(),
                    scope: t.scope.to_string(),
                    path: if t.folder.is_empty() {
                        t.file.clone()
                    } else {
                        format!("{}/{}", t.folder.trim_end_matches('/'), t.file)
                    },
                    template: t.template.clone(),
                })
                .collect(),
        })
        .collect();

    ListReport {
        project: manifest.project.name.clone(),
        bundles,
        entities: model.map(Model::entity_names),
    }
}

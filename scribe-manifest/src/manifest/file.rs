use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// A scribe.toml file with its location and parsed manifest.
///
/// Relative paths in the manifest (destination, templates, profile) are
/// resolved against the folder containing the file.
pub struct ScribeToml {
    path: PathBuf,
    root: PathBuf,
    manifest: Manifest,
}

impl ScribeToml {
    /// Open and parse a scribe.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;
        let root = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            path,
            root,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Folder containing the file.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Resolve a manifest-relative path.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

//! Bundle manifest input for the `report` command.

use anyhow::{Context, Result};
use bundlemap_core::BundleInput;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON document describing the bundles of a build.
///
/// ```json
/// {
///   "projectRoot": "/home/me/app",
///   "bundles": [
///     { "name": "index.js", "target": "browser", "size": 2048,
///       "assets": [{ "filePath": "/home/me/app/src/index.js", "size": 600 }] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Root that asset paths are made relative to. Relative values are
    /// resolved against the manifest's directory.
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    /// Bundles to report on.
    pub bundles: Vec<BundleInput>,
    /// Directory containing the manifest file.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// A relative `projectRoot` is resolved against the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let mut manifest: Manifest = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid manifest {}", path.display()))?;

        let base = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        manifest.project_root = manifest.project_root.take().map(|root| {
            if root.is_relative() {
                base.join(root)
            } else {
                root
            }
        });
        manifest.base_dir = base.to_path_buf();

        tracing::debug!(
            manifest = %path.display(),
            bundles = manifest.bundles.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// The manifest's own `projectRoot`, or its directory when it names none.
    pub fn project_root_or_base(&self) -> &Path {
        self.project_root.as_deref().unwrap_or(&self.base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_root_defaults_to_manifest_dir() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundles.json");
        fs::write(&path, r#"{ "bundles": [] }"#).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.project_root, None);
        assert_eq!(manifest.project_root_or_base(), temp.path());
    }

    #[test]
    fn test_relative_project_root_is_resolved() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundles.json");
        fs::write(&path, r#"{ "projectRoot": "app", "bundles": [] }"#).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.project_root, Some(temp.path().join("app")));
        assert_eq!(manifest.project_root_or_base(), temp.path().join("app").as_path());
    }

    #[test]
    fn test_invalid_manifest_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundles.json");
        fs::write(&path, "not json").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(err.to_string().contains("bundles.json"));
    }
}

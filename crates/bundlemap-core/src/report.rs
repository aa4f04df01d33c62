//! Per-target bundle reports.
//!
//! Turns bundles (a name, an emitted size and the source assets inside them)
//! into one [`Group`] tree per bundle, grouped by output target.

use crate::error::{Error, Result};
use crate::treemap::PathTreeAggregator;
use crate::types::{FileEntry, Group};
use indexmap::IndexMap;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Target name used when a bundle does not declare one.
pub const DEFAULT_TARGET: &str = "default";

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

/// A source file included in a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    /// Absolute path, or a path already relative to the project root.
    pub file_path: PathBuf,
    /// Size of the asset's output in bytes.
    pub size: u64,
}

/// An emitted bundle and the assets it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleInput {
    /// Label of the bundle's root group, usually its output file name.
    pub name: String,
    /// Output target the bundle belongs to.
    #[serde(default = "default_target")]
    pub target: String,
    /// Total emitted size in bytes.
    pub size: u64,
    /// Assets in the bundle.
    #[serde(default)]
    pub assets: Vec<AssetInput>,
}

/// Size trees for every bundle of one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    /// Target name.
    pub target: String,
    /// One root group per bundle, in input order.
    pub groups: Vec<Group>,
}

impl TargetReport {
    /// Treemap payload for this target: `{ "groups": [...] }`.
    pub fn chart_data(&self) -> serde_json::Value {
        serde_json::json!({ "groups": self.groups })
    }

    /// Sum of the bundle sizes in this target.
    pub fn total_weight(&self) -> u64 {
        self.groups.iter().map(|group| group.weight).sum()
    }
}

/// Assembles bundle reports relative to a project root.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    project_root: PathBuf,
}

impl ReportBuilder {
    /// Creates a builder for `project_root`.
    ///
    /// A relative root is resolved against the working directory so it can be
    /// compared with absolute asset paths; the result is cleaned lexically.
    pub fn new(project_root: impl Into<PathBuf>) -> Result<Self> {
        let project_root: PathBuf = project_root.into();
        let project_root = if project_root.is_absolute() {
            project_root
        } else {
            std::env::current_dir()
                .map_err(|source| Error::CurrentDir {
                    root: project_root.clone(),
                    source,
                })?
                .join(&project_root)
        };

        Ok(Self {
            project_root: project_root.clean(),
        })
    }

    /// The absolute, normalized project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Size-tree entry for an asset, with its path made project-relative.
    pub fn entry_for(&self, asset: &AssetInput) -> Result<FileEntry> {
        let relative = if asset.file_path.is_absolute() {
            relative_to(&asset.file_path.clean(), &self.project_root)
        } else {
            asset.file_path.clean()
        };

        FileEntry::from_relative_path(&relative, asset.size)
    }

    /// Root group of a bundle: labelled with its name, weighted by its
    /// emitted size, containing the aggregated asset tree.
    pub fn bundle_group(&self, bundle: &BundleInput) -> Result<Group> {
        let entries = bundle
            .assets
            .iter()
            .map(|asset| self.entry_for(asset))
            .collect::<Result<Vec<_>>>()?;

        let children = PathTreeAggregator::aggregate(&entries)?;
        tracing::debug!(
            bundle = %bundle.name,
            target_name = %bundle.target,
            assets = entries.len(),
            size = bundle.size,
            "built bundle group"
        );

        Ok(Group::with_weight(bundle.name.clone(), bundle.size, children))
    }

    /// Reports for all bundles, grouped by target in encounter order.
    pub fn build(&self, bundles: &[BundleInput]) -> Result<Vec<TargetReport>> {
        let mut by_target: IndexMap<&str, Vec<Group>> = IndexMap::new();

        for bundle in bundles {
            let group = self.bundle_group(bundle)?;
            by_target.entry(bundle.target.as_str()).or_default().push(group);
        }

        Ok(by_target
            .into_iter()
            .map(|(target, groups)| TargetReport {
                target: target.to_string(),
                groups,
            })
            .collect())
    }
}

/// Lexical relative path from `base` to `path`; both must be clean and absolute.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component<'_>> = path.components().collect();
    let base_components: Vec<Component<'_>> = base.components().collect();

    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

//! Core data types for size-tree aggregation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// A single bundled file: its project-relative path split into segments,
/// and its size in bytes.
///
/// Entries are validated on construction, so the aggregator can rely on a
/// non-empty path made of non-empty segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    segments: Vec<String>,
    weight: u64,
}

impl FileEntry {
    /// Creates an entry from already-split path segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] when no segments are given and
    /// [`Error::EmptySegment`] when any segment is empty.
    pub fn new<I, S>(segments: I, weight: u64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();

        if segments.is_empty() {
            return Err(Error::EmptyPath);
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::EmptySegment {
                path: segments.join("/"),
            });
        }

        Ok(Self { segments, weight })
    }

    /// Creates an entry from a relative filesystem path.
    ///
    /// `.` components are dropped and `..` components are kept as `..`
    /// segments, so files outside the project root still form a tree.
    pub fn from_relative_path(path: &Path, weight: u64) -> Result<Self> {
        let mut segments = Vec::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                Component::ParentDir => segments.push("..".to_string()),
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::AbsolutePath {
                        path: path.to_path_buf(),
                    });
                }
            }
        }

        Self::new(segments, weight)
    }

    /// Creates an entry from a `/`-separated relative path such as `src/index.js`.
    pub fn from_slash_path(path: &str, weight: u64) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        if path.starts_with('/') {
            return Err(Error::AbsolutePath { path: path.into() });
        }

        Self::new(path.split('/').filter(|segment| *segment != "."), weight)
    }

    /// Path segments, outermost directory first and the file name last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Size of the file in bytes.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The path re-joined with `/`, for diagnostics.
    pub fn display_path(&self) -> String {
        self.segments.join("/")
    }
}

/// A node of the weighted hierarchy rendered as a treemap.
///
/// Leaves are files; internal groups are directories (or collapsed chains of
/// directories) whose weight is the sum of their children. Serializes as
/// `{ "label", "weight", "groups" }`, with `groups` omitted on leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// File name, directory name, or `/`-joined collapsed path.
    pub label: String,
    /// Size in bytes.
    pub weight: u64,
    /// Child groups in encounter order. Empty for leaves.
    #[serde(rename = "groups", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Group>,
}

impl Group {
    /// A file group with no children.
    pub fn leaf(label: impl Into<String>, weight: u64) -> Self {
        Self {
            label: label.into(),
            weight,
            children: Vec::new(),
        }
    }

    /// A directory group whose weight is the sum of its children.
    pub fn directory(label: impl Into<String>, children: Vec<Group>) -> Self {
        let weight = children.iter().map(|child| child.weight).sum();
        Self {
            label: label.into(),
            weight,
            children,
        }
    }

    /// A group with an explicit weight, independent of its children.
    ///
    /// Used for bundle roots, whose weight is the emitted bundle size rather
    /// than the sum of the source assets inside it.
    pub fn with_weight(label: impl Into<String>, weight: u64, children: Vec<Group>) -> Self {
        Self {
            label: label.into(),
            weight,
            children,
        }
    }

    /// Whether this group represents a single file.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of files below (or at) this group.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Group::leaf_count).sum()
        }
    }
}

//! Error types for bundlemap core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for bundlemap core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when size-tree input violates its preconditions.
#[derive(Debug, Error)]
pub enum Error {
    /// A file entry was given no path segments.
    #[error("File entry has an empty path")]
    EmptyPath,

    /// A file entry contains an empty segment (e.g. `src//index.js`).
    #[error("Empty segment in path: {path}")]
    EmptySegment {
        /// The offending path, `/`-joined.
        path: String,
    },

    /// An absolute path was passed where a project-relative one is required.
    #[error("Expected a relative path, got {path:?}")]
    AbsolutePath {
        /// The absolute path.
        path: PathBuf,
    },

    /// The working directory could not be read to resolve a relative project root.
    #[error("Cannot resolve relative project root {root:?}: {source}")]
    CurrentDir {
        /// The relative root that needed resolving.
        root: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path uses a file as a directory, or names an existing directory as a file.
    #[error("Path conflicts with an existing entry: {path}")]
    PathConflict {
        /// The conflicting path, `/`-joined.
        path: String,
    },
}

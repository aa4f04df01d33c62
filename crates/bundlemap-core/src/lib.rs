//! bundlemap core - package specifiers and bundle size trees.
//!
//! This crate holds the pure transformations behind bundlemap:
//!
//! - [`SpecifierParser`]: reduces an import specifier such as
//!   `@babel/core/lib/index.js` to its package identifier (`@babel/core`)
//! - [`PathTreeAggregator`]: turns `(path, bytes)` pairs into a nested,
//!   weighted [`Group`] tree, collapsing single-child directory chains
//! - [`ReportBuilder`]: wraps the aggregated trees of each bundle under a
//!   bundle-named root and groups them per output target
//!
//! # Example
//!
//! ```
//! use bundlemap_core::{FileEntry, PathTreeAggregator, SpecifierParser};
//!
//! let ids = SpecifierParser::parse_all(&["lodash/fp", "./local.js"]);
//! assert_eq!(ids, vec!["lodash".to_string(), String::new()]);
//!
//! let entries = vec![
//!     FileEntry::from_slash_path("src/index.js", 120)?,
//!     FileEntry::from_slash_path("src/util/math.js", 30)?,
//! ];
//! let groups = PathTreeAggregator::aggregate(&entries)?;
//! assert_eq!(groups[0].label, "src");
//! assert_eq!(groups[0].weight, 150);
//! # Ok::<(), bundlemap_core::Error>(())
//! ```

pub mod error;
pub mod report;
pub mod size;
pub mod specifier;
pub mod treemap;
pub mod types;

pub use error::{Error, Result};
pub use report::{AssetInput, BundleInput, ReportBuilder, TargetReport, DEFAULT_TARGET};
pub use size::format_bytes;
pub use specifier::{ModuleSpecifier, SpecifierError, SpecifierParser};
pub use treemap::{PathTreeAggregator, LABEL_SEPARATOR};
pub use types::{FileEntry, Group};

//! Size-tree aggregation for treemap rendering.

use crate::error::{Error, Result};
use crate::types::{FileEntry, Group};
use indexmap::IndexMap;

/// Joins directory names when a single-child chain is collapsed.
pub const LABEL_SEPARATOR: &str = "/";

/// Intermediate tree, keyed by path segment in encounter order.
#[derive(Debug)]
enum PathNode {
    File(u64),
    Dir(IndexMap<String, PathNode>),
}

/// Builds weighted [`Group`] trees from flat `(path, bytes)` entries.
pub struct PathTreeAggregator;

impl PathTreeAggregator {
    /// Aggregates entries into the top-level groups of a size tree.
    ///
    /// Directories weigh the sum of their children. A directory left with a
    /// single child is merged into it, so `a/b/c/index.js` alone becomes one
    /// group labelled `a/b/c/index.js`. Siblings keep the order in which
    /// their names were first seen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathConflict`] when one entry's directory is another
    /// entry's file.
    pub fn aggregate(entries: &[FileEntry]) -> Result<Vec<Group>> {
        let mut root = IndexMap::new();
        for entry in entries {
            insert(&mut root, entry)?;
        }

        let groups = into_groups(root);
        tracing::debug!(
            entries = entries.len(),
            top_level = groups.len(),
            "aggregated size tree"
        );
        Ok(groups)
    }
}

fn insert(root: &mut IndexMap<String, PathNode>, entry: &FileEntry) -> Result<()> {
    let (basename, dirs) = entry.segments().split_last().ok_or(Error::EmptyPath)?;

    let mut current = root;
    for dir in dirs {
        let node = current
            .entry(dir.clone())
            .or_insert_with(|| PathNode::Dir(IndexMap::new()));
        current = match node {
            PathNode::Dir(children) => children,
            PathNode::File(_) => {
                return Err(Error::PathConflict {
                    path: entry.display_path(),
                })
            }
        };
    }

    match current.get(basename) {
        Some(PathNode::Dir(_)) => {
            return Err(Error::PathConflict {
                path: entry.display_path(),
            })
        }
        Some(PathNode::File(previous)) => {
            tracing::warn!(
                path = %entry.display_path(),
                previous,
                weight = entry.weight(),
                "duplicate file entry, keeping the last weight"
            );
        }
        None => {}
    }

    // Replacing an existing key keeps its position.
    current.insert(basename.clone(), PathNode::File(entry.weight()));
    Ok(())
}

fn into_groups(nodes: IndexMap<String, PathNode>) -> Vec<Group> {
    nodes
        .into_iter()
        .map(|(name, node)| match node {
            PathNode::File(weight) => Group::leaf(name, weight),
            PathNode::Dir(children) => {
                let mut groups = into_groups(children);
                if groups.len() == 1 {
                    let only = groups.remove(0);
                    Group {
                        label: format!("{name}{LABEL_SEPARATOR}{}", only.label),
                        ..only
                    }
                } else {
                    Group::directory(name, groups)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, weight: u64) -> FileEntry {
        FileEntry::from_slash_path(path, weight).unwrap()
    }

    #[test]
    fn test_mixed_depth_directory() {
        let groups =
            PathTreeAggregator::aggregate(&[entry("a/x.js", 100), entry("a/b/y.js", 50)]).unwrap();

        assert_eq!(groups.len(), 1);
        let a = &groups[0];
        assert_eq!(a.label, "a");
        assert_eq!(a.weight, 150);
        assert_eq!(
            a.children,
            vec![Group::leaf("x.js", 100), Group::leaf("b/y.js", 50)]
        );
    }

    #[test]
    fn test_single_file_chain_collapses() {
        let groups = PathTreeAggregator::aggregate(&[entry("a/b/c/singlefile.js", 42)]).unwrap();
        assert_eq!(groups, vec![Group::leaf("a/b/c/singlefile.js", 42)]);
    }

    #[test]
    fn test_chain_collapses_into_directory() {
        let groups = PathTreeAggregator::aggregate(&[
            entry("node_modules/react/cjs/react.js", 10),
            entry("node_modules/react/cjs/jsx.js", 5),
        ])
        .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "node_modules/react/cjs");
        assert_eq!(groups[0].weight, 15);
        assert_eq!(groups[0].children.len(), 2);
    }

    #[test]
    fn test_siblings_keep_insertion_order() {
        let groups = PathTreeAggregator::aggregate(&[
            entry("src/z.js", 1),
            entry("lib/a.js", 100),
            entry("src/a.js", 50),
            entry("index.js", 7),
        ])
        .unwrap();

        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["src", "lib/a.js", "index.js"]);

        let src: Vec<_> = groups[0].children.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(src, vec!["z.js", "a.js"]);
    }

    #[test]
    fn test_zero_weight_files() {
        let groups =
            PathTreeAggregator::aggregate(&[entry("empty/a.js", 0), entry("empty/b.js", 0)])
                .unwrap();
        assert_eq!(groups[0].weight, 0);
        assert_eq!(groups[0].children.len(), 2);
    }

    #[test]
    fn test_duplicate_path_keeps_position_and_last_weight() {
        let groups = PathTreeAggregator::aggregate(&[
            entry("src/a.js", 1),
            entry("src/b.js", 2),
            entry("src/a.js", 10),
        ])
        .unwrap();

        assert_eq!(
            groups[0].children,
            vec![Group::leaf("a.js", 10), Group::leaf("b.js", 2)]
        );
        assert_eq!(groups[0].weight, 12);
    }

    #[test]
    fn test_file_used_as_directory_conflicts() {
        let result = PathTreeAggregator::aggregate(&[entry("src", 1), entry("src/a.js", 2)]);
        assert!(matches!(result, Err(Error::PathConflict { .. })));

        let result = PathTreeAggregator::aggregate(&[entry("src/a.js", 2), entry("src", 1)]);
        assert!(matches!(result, Err(Error::PathConflict { .. })));
    }

    #[test]
    fn test_empty_input() {
        assert!(PathTreeAggregator::aggregate(&[]).unwrap().is_empty());
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn entries_strategy() -> impl Strategy<Value = Vec<FileEntry>> {
            // Directories and files use disjoint alphabets, so no path conflicts.
            let dir = prop::sample::select(vec!["a", "b", "c", "d"]);
            let file = prop::sample::select(vec!["x.js", "y.js", "z.css"]);
            prop::collection::vec(
                (prop::collection::vec(dir, 0..4), file, 0u64..10_000),
                1..40,
            )
            .prop_map(|raw| {
                raw.into_iter()
                    .map(|(mut dirs, file, weight)| {
                        dirs.push(file);
                        FileEntry::new(dirs, weight).unwrap()
                    })
                    .collect()
            })
        }

        fn check_weights(group: &Group) -> bool {
            group.is_leaf()
                || (group.weight == group.children.iter().map(|c| c.weight).sum::<u64>()
                    && group.children.iter().all(check_weights))
        }

        fn has_single_child(group: &Group) -> bool {
            group.children.len() == 1 || group.children.iter().any(has_single_child)
        }

        proptest! {
            #[test]
            fn internal_weights_equal_child_sums(entries in entries_strategy()) {
                let groups = PathTreeAggregator::aggregate(&entries).unwrap();
                prop_assert!(groups.iter().all(check_weights));
            }

            #[test]
            fn no_group_has_exactly_one_child(entries in entries_strategy()) {
                let groups = PathTreeAggregator::aggregate(&entries).unwrap();
                prop_assert!(!groups.iter().any(has_single_child));
            }

            #[test]
            fn total_weight_matches_unique_entries(entries in entries_strategy()) {
                // Later duplicates replace earlier ones.
                let mut unique: IndexMap<String, u64> = IndexMap::new();
                for entry in &entries {
                    unique.insert(entry.display_path(), entry.weight());
                }

                let groups = PathTreeAggregator::aggregate(&entries).unwrap();
                let total: u64 = groups.iter().map(|g| g.weight).sum();
                let leaves: usize = groups.iter().map(Group::leaf_count).sum();

                prop_assert_eq!(total, unique.values().sum::<u64>());
                prop_assert_eq!(leaves, unique.len());
            }

            #[test]
            fn chain_collapses_regardless_of_depth(depth in 1usize..12, weight in 0u64..1_000_000) {
                let mut segments: Vec<String> = (0..depth).map(|i| format!("d{i}")).collect();
                segments.push("file.js".to_string());
                let expected = segments.join(LABEL_SEPARATOR);

                let groups = PathTreeAggregator::aggregate(&[FileEntry::new(segments, weight).unwrap()]).unwrap();
                prop_assert_eq!(groups, vec![Group::leaf(expected, weight)]);
            }
        }
    }
}

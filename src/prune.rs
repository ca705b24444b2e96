//! Deleting every value whose path matches a glob.
//!
//! Paths are matched in their escaped, dotted form (`metadata.annotations.example\.com/id`), so
//! a pattern is written exactly like a path, with `*`, `?` and `[...]` added. `.` is not special
//! to the glob: `*` happily matches across several segments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::glob::GlobPattern;
use crate::navigate::delete_if_exists;
use crate::path::{OwnedPath, PathError};
use crate::value::Value;

/// Deletes every value below `root` whose path matches the glob `pattern`, returning how many
/// subtrees were removed.
///
/// # Errors
/// Fails when `pattern` can't be compiled, see [`GlobPattern::new`].
pub fn delete_matching_path(root: &mut Value, pattern: &str) -> Result<usize, Error> {
    let glob = GlobPattern::new(pattern)?;
    Ok(delete_matching(root, &glob)?)
}

/// Like [`delete_matching_path`], with a pre-compiled pattern.
///
/// The whole tree is enumerated before anything is deleted. A match nested inside another match
/// goes away with its ancestor and is not counted separately. Deletions run in reverse
/// enumeration order so that removing an array element never shifts a later match.
///
/// This differs from deleting each match in turn, front to back. Done that way, `a.*` on
/// `{ "a": [1, 2, 3, 4] }` removes `a.0`, shifting `2` into its place, then `a.1`, which now
/// holds `3`, after which `a.2` and `a.3` no longer exist and `[2, 4]` is left behind. Here
/// every enumerated match is removed and `[]` is left.
///
/// # Errors
/// Propagates path errors from deletion. Paths produced by enumeration always resolve, so this
/// only happens if `root` is changed concurrently, which the borrow rules rule out.
pub fn delete_matching(root: &mut Value, glob: &GlobPattern) -> Result<usize, PathError> {
    let mut matches: Vec<OwnedPath> = Vec::new();
    for (_, path) in root.iter_paths() {
        if path.is_root() || !glob.matches(&path.to_string()) {
            continue;
        }
        // Pre-order puts a match's descendants right after it.
        if matches.last().is_some_and(|outer| path.starts_with(outer)) {
            continue;
        }
        matches.push(path);
    }

    let mut deleted = 0;
    for path in matches.iter().rev() {
        if delete_if_exists(root, path)?.is_some() {
            debug!(message = "Deleted matching path.", %path, pattern = %glob);
            deleted += 1;
        }
    }

    debug!(message = "Finished deleting matching paths.", pattern = %glob, deleted);
    Ok(deleted)
}

/// A set of glob patterns to prune from values, typically loaded from a configuration file:
///
/// ```toml
/// patterns = ["metadata.annotations.*", "status", "spec.containers.*.image"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PruneConfig {
    #[serde(default)]
    pub patterns: Vec<GlobPattern>,
}

impl PruneConfig {
    pub fn new(patterns: impl IntoIterator<Item = GlobPattern>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// Applies every pattern in order, returning the total number of removed subtrees.
    ///
    /// # Errors
    /// See [`delete_matching`].
    pub fn apply(&self, root: &mut Value) -> Result<usize, PathError> {
        self.patterns
            .iter()
            .try_fold(0, |total, glob| Ok(total + delete_matching(root, glob)?))
    }
}

impl Value {
    /// See [`delete_matching_path`].
    ///
    /// # Errors
    /// See [`delete_matching_path`].
    pub fn delete_matching_path(&mut self, pattern: &str) -> Result<usize, Error> {
        delete_matching_path(self, pattern)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use tracing_test::traced_test;

    use super::*;
    use crate::glob::PatternError;
    use crate::value;

    #[test]
    fn delete_matching_cases() {
        let cases = vec![
            (
                // Same key under every parent
                value!({ "a": { "x": 1, "y": 2 }, "b": { "x": 3 } }),
                "*.x",
                2,
                value!({ "a": { "y": 2 }, "b": {} }),
            ),
            (
                // No match
                value!({ "a": { "x": 1 } }),
                "*.z",
                0,
                value!({ "a": { "x": 1 } }),
            ),
            (
                // `*` crosses segments
                value!({ "a": { "b": { "x": 1 } }, "x": 2 }),
                "*x",
                2,
                value!({ "a": { "b": {} } }),
            ),
            (
                // Everything below the root
                value!({ "a": { "b": 1 }, "c": [1, 2] }),
                "*",
                2,
                value!({}),
            ),
            (
                // Every array element, none skipped by shifting indices
                value!({ "a": [1, 2, 3, 4] }),
                "a.*",
                4,
                value!({ "a": [] }),
            ),
            (
                // Some array elements
                value!({ "a": [{ "x": 1 }, { "y": 2 }, { "x": 3 }] }),
                "a.[02]",
                2,
                value!({ "a": [{ "y": 2 }] }),
            ),
            (
                // Fields of array elements
                value!({ "a": [{ "x": 1, "k": 1 }, { "x": 2 }] }),
                "a.?.x",
                2,
                value!({ "a": [{ "k": 1 }, {}] }),
            ),
            (
                // Parent and child both match, the parent wins
                value!({ "a": { "a": 1 }, "b": 1 }),
                "a*",
                1,
                value!({ "b": 1 }),
            ),
            (
                // Dots in keys are matched escaped
                value!({ "labels": { "example.com/id": 1, "name": "x" } }),
                r"labels.example\.com/*",
                1,
                value!({ "labels": { "name": "x" } }),
            ),
            (
                value!({ "labels": { "example.com/id": 1 } }),
                "labels.example.com/*",
                0,
                value!({ "labels": { "example.com/id": 1 } }),
            ),
            (
                // Reversed ranges match nothing
                value!({ "a": 1, "z": 2 }),
                "[z-a]",
                0,
                value!({ "a": 1, "z": 2 }),
            ),
            (
                // Chained ranges
                value!({ "a": [1, 2, 3, 4, 5] }),
                "a.[0-1-3]",
                3,
                value!({ "a": [3, 5] }),
            ),
            (
                // Scalar roots have nothing to delete
                value!("abc"),
                "*",
                0,
                value!("abc"),
            ),
        ];

        for (mut root, pattern, deleted, expected) in cases {
            assert_eq!(
                delete_matching_path(&mut root, pattern).unwrap(),
                deleted,
                "{pattern}"
            );
            assert_eq!(root, expected, "{pattern}");
        }
    }

    #[test]
    fn invalid_pattern() {
        let mut root = value!({ "a": 1 });

        let error = root.delete_matching_path(&"?".repeat(200_000)).unwrap_err();

        assert!(matches!(
            error,
            Error::Pattern {
                source: PatternError::InvalidPattern { .. }
            }
        ));
        assert_eq!(root, value!({ "a": 1 }));
    }

    #[test]
    fn config_from_toml() {
        let config: PruneConfig = toml::from_str(indoc! {r#"
            patterns = [
                "metadata.annotations.*",
                "status",
                "spec.containers.*.image",
            ]
        "#})
        .unwrap();

        let mut root = value!({
            "metadata": { "name": "web", "annotations": { "a": "1", "b": "2" } },
            "spec": { "containers": [{ "name": "nginx", "image": "nginx:1" }] },
            "status": { "ready": true },
        });

        assert_eq!(config.apply(&mut root).unwrap(), 4);
        assert_eq!(
            root,
            value!({
                "metadata": { "name": "web", "annotations": {} },
                "spec": { "containers": [{ "name": "nginx" }] },
            })
        );
    }

    #[test]
    fn config_from_json() {
        let config: PruneConfig = serde_json::from_str(r#"{ "patterns": ["a"] }"#).unwrap();
        assert_eq!(config, PruneConfig::new([GlobPattern::new("a").unwrap()]));

        let empty: PruneConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PruneConfig::default());

        assert!(serde_json::from_str::<PruneConfig>(r#"{ "pattern": ["a"] }"#).is_err());
        assert!(serde_json::from_str::<PruneConfig>(r#"{ "patterns": ["[z-a]"] }"#).is_err());
    }

    quickcheck::quickcheck! {
        fn star_empties_containers(root: Value) -> quickcheck::TestResult {
            let empty = match &root {
                Value::Object(_) => value!({}),
                Value::Array(_) => value!([]),
                _ => return quickcheck::TestResult::discard(),
            };
            let children = root.paths().filter(|path| path.len() == 1).count();

            let mut pruned = root.clone();
            let deleted = delete_matching_path(&mut pruned, "*").unwrap();

            quickcheck::TestResult::from_bool(deleted == children && pruned == empty)
        }
    }

    #[traced_test]
    #[test]
    fn logs_deletions() {
        let mut root = value!({ "a": { "x": 1 }, "b": { "x": 2 } });

        delete_matching_path(&mut root, "*.x").unwrap();

        assert!(logs_contain("Deleted matching path."));
        assert!(logs_contain("path=b.x"));
        assert!(logs_contain("deleted=2"));
    }
}

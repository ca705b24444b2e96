//! Depth-first enumeration of every value in a tree, paired with its path.

use crate::path::OwnedPath;
use crate::value::Value;

/// An iterator over every value of a tree in depth-first pre-order.
///
/// Created by [`Value::iter_paths`]. The root comes first, with the empty path. Object entries
/// are visited in key order and array elements by position; strings and other scalars are
/// leaves.
#[derive(Debug, Clone)]
pub struct PathIter<'a> {
    stack: Vec<(&'a Value, OwnedPath)>,
}

impl<'a> PathIter<'a> {
    #[must_use]
    pub fn new(root: &'a Value) -> Self {
        Self {
            stack: vec![(root, OwnedPath::root())],
        }
    }
}

impl<'a> Iterator for PathIter<'a> {
    type Item = (&'a Value, OwnedPath);

    fn next(&mut self) -> Option<Self::Item> {
        let (value, path) = self.stack.pop()?;

        // Children are pushed in reverse so the first one is visited next.
        match value {
            Value::Object(map) => self.stack.extend(
                map.iter()
                    .rev()
                    .map(|(key, child)| (child, path.with_segment_appended(key.clone()))),
            ),
            Value::Array(array) => self.stack.extend(
                array
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(index, child)| (child, path.with_segment_appended(index))),
            ),
            _ => {}
        }

        Some((value, path))
    }
}

/// Enumerates `root` and everything below it. See [`PathIter`].
#[must_use]
pub fn enumerate(root: &Value) -> PathIter<'_> {
    PathIter::new(root)
}

impl Value {
    /// See [`PathIter`].
    #[must_use]
    pub fn iter_paths(&self) -> PathIter<'_> {
        PathIter::new(self)
    }

    /// The paths of every value below this one, in depth-first pre-order.
    pub fn paths(&self) -> impl Iterator<Item = OwnedPath> + '_ {
        self.iter_paths().skip(1).map(|(_, path)| path)
    }
}

//! Resolving paths against a [`Value`].
//!
//! Navigation never fails because something is missing. It reports the immediate parent of the
//! addressed value (the *container*), the final segment as understood by that container (the
//! *key*) and whether the value currently exists. The mutators in this module only ever touch
//! that container.

use std::fmt;
use std::num::IntErrorKind;

use snafu::ResultExt;
use tracing::trace;

use crate::path::{InvalidIndexSnafu, OwnedPath, PathError, ValuePath};
use crate::value::{KeyString, Value};

mod mutate;

pub use mutate::{delete_if_exists, delete_if_falsy, set_if_not_exists};

/// The final segment of a path, as interpreted by the container it was applied to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Field(KeyString),

    /// An array index. Negative and out of range indices are kept as-is so callers can tell
    /// which index was asked for.
    Index(isize),
}

impl Key {
    #[must_use]
    pub fn as_field(&self) -> Option<&str> {
        match self {
            Self::Field(field) => Some(field.as_str()),
            Self::Index(_) => None,
        }
    }

    #[must_use]
    pub const fn as_index(&self) -> Option<isize> {
        match self {
            Self::Field(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(&field.escaped()),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(field: &str) -> Self {
        Self::Field(field.into())
    }
}

impl From<isize> for Key {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

/// The outcome of [`navigate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation<'a> {
    /// The value holding the addressed entry. `None` when a `null` was reached on the way.
    pub container: Option<&'a Value>,

    /// `None` when the walk stopped at a scalar, which can't be indexed into at all.
    pub key: Option<Key>,

    pub found: bool,
}

impl<'a> Navigation<'a> {
    const fn missing(container: Option<&'a Value>, key: Option<Key>) -> Self {
        Self {
            container,
            key,
            found: false,
        }
    }

    /// The addressed value, if it exists.
    #[must_use]
    pub fn value(&self) -> Option<&'a Value> {
        if !self.found {
            return None;
        }
        get(self.container?, self.key.as_ref()?)
    }
}

/// Resolves `path` against `root`.
///
/// Resolution walks the segments left to right:
/// - at a `null`, stops with no container and the current segment as key;
/// - at an object, stops when the key is absent, otherwise descends;
/// - at an array, the segment must be an integer; stops when it is out of range, otherwise
///   descends;
/// - at any other value (strings included), stops with no key.
///
/// An empty path resolves to the root itself, with no key, and is never "found".
///
/// # Errors
/// Fails when `path` can't be turned into segments, or when a segment applied to an array is
/// not an integer.
pub fn navigate(root: &Value, path: impl ValuePath) -> Result<Navigation<'_>, PathError> {
    let path = path.to_owned_path()?;
    resolve(root, &path).map(|(navigation, _)| navigation)
}

enum Lookup<'a> {
    Found(&'a Value, Key),
    Missing(Navigation<'a>),
}

/// Resolves a pre-parsed path, additionally returning how many leading segments lead to the
/// container.
pub(crate) fn resolve<'a>(
    root: &'a Value,
    path: &OwnedPath,
) -> Result<(Navigation<'a>, usize), PathError> {
    let Some((last, init)) = path.segments().split_last() else {
        return Ok((Navigation::missing(Some(root), None), 0));
    };

    let mut node = root;
    for (depth, segment) in init.iter().enumerate() {
        match lookup(node, segment)? {
            Lookup::Found(child, _) => node = child,
            Lookup::Missing(navigation) => {
                trace!(message = "Path not found.", %path, depth);
                return Ok((navigation, depth));
            }
        }
    }

    let navigation = match lookup(node, last)? {
        Lookup::Found(_, key) => Navigation {
            container: Some(node),
            key: Some(key),
            found: true,
        },
        Lookup::Missing(navigation) => navigation,
    };
    Ok((navigation, init.len()))
}

fn lookup<'a>(node: &'a Value, segment: &KeyString) -> Result<Lookup<'a>, PathError> {
    let lookup = match node {
        Value::Null => Lookup::Missing(Navigation::missing(
            None,
            Some(Key::Field(segment.clone())),
        )),
        Value::Object(map) => {
            let key = Key::Field(segment.clone());
            match map.get(segment.as_str()) {
                Some(child) => Lookup::Found(child, key),
                None => Lookup::Missing(Navigation::missing(Some(node), Some(key))),
            }
        }
        Value::Array(array) => {
            let index = parse_index(segment)?;
            let key = Key::Index(index);
            match usize::try_from(index).ok().and_then(|i| array.get(i)) {
                Some(child) => Lookup::Found(child, key),
                None => Lookup::Missing(Navigation::missing(Some(node), Some(key))),
            }
        }
        _ => Lookup::Missing(Navigation::missing(Some(node), None)),
    };

    Ok(lookup)
}

/// Parses an array index. Integers too large for `isize` are clamped: they can never be in
/// range, so they simply resolve as missing.
fn parse_index(segment: &KeyString) -> Result<isize, PathError> {
    match segment.to_index() {
        Ok(index) => Ok(index),
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => Ok(isize::MAX),
            IntErrorKind::NegOverflow => Ok(isize::MIN),
            _ => Err(error).context(InvalidIndexSnafu {
                segment: segment.as_str(),
            }),
        },
    }
}

fn get<'a>(container: &'a Value, key: &Key) -> Option<&'a Value> {
    match (container, key) {
        (Value::Object(map), Key::Field(field)) => map.get(field.as_str()),
        (Value::Array(array), Key::Index(index)) => {
            usize::try_from(*index).ok().and_then(|i| array.get(i))
        }
        _ => None,
    }
}

/// Walks segments that are known to exist, handing out the value they lead to mutably.
fn container_mut<'a>(mut node: &'a mut Value, segments: &[KeyString]) -> Option<&'a mut Value> {
    for segment in segments {
        node = match node {
            Value::Object(map) => map.get_mut(segment.as_str())?,
            Value::Array(array) => {
                let index = usize::try_from(segment.to_index().ok()?).ok()?;
                array.get_mut(index)?
            }
            _ => return None,
        };
    }
    Some(node)
}

impl Value {
    /// See [`navigate`].
    ///
    /// # Errors
    /// See [`navigate`].
    pub fn navigate(&self, path: impl ValuePath) -> Result<Navigation<'_>, PathError> {
        navigate(self, path)
    }

    /// Returns the value at `path`, if it exists.
    ///
    /// # Errors
    /// See [`navigate`].
    pub fn get_path(&self, path: impl ValuePath) -> Result<Option<&Self>, PathError> {
        Ok(navigate(self, path)?.value())
    }
}

//! This module contains all of the logic for paths.
//!
//! A path points to a value nested inside of a [`Value`]. Externally a path is written as a
//! dot-delimited string, each segment naming either an object key or an array index:
//!
//! ```json
//! {
//!   "foo": {
//!       "bar": 1
//!    },
//!    "baz": ["a", "b", "c"],
//!    "qu.ux": true
//! }
//! ```
//!
//! | path       | value it points to   |
//! |------------|----------------------|
//! | `foo.bar`  | `1`                  |
//! | `foo`      | `{ "bar": 1 }`       |
//! | `baz.0`    | `"a"`                |
//! | `qu\.ux`   | `true`               |
//!
//! A literal `.` inside a segment is escaped as `\.`; it never acts as a separator. A `\` that
//! is not followed by a `.` has no special meaning. Whether a segment is a key or an index is
//! decided while navigating, by the container it is applied to.
//!
//! # Inputs
//! Functions that take a path accept anything implementing [`ValuePath`]: strings are parsed,
//! already-split sequences of segments (`["a.b", "c"]`) are used as-is, and dynamically-typed
//! values (a [`Value`] or a `serde_json::Value`) are accepted when they hold a string or an
//! array of strings. Anything else is rejected with [`PathError::InvalidPathType`].
//!
//! [`Value`]: crate::value::Value

use std::borrow::Cow;
use std::num::ParseIntError;

use snafu::Snafu;

pub use owned::OwnedPath;
pub use parse::{parse_path, Segments};

use crate::value::{KeyString, Value};

mod owned;
mod parse;

#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PathError {
    #[snafu(display("Invalid path type {:?}, expected a string or a list of strings", kind))]
    InvalidPathType { kind: &'static str },

    #[snafu(display("Invalid array index {:?}: {}", segment, source))]
    InvalidIndex {
        segment: String,
        source: ParseIntError,
    },
}

/// Syntactic sugar for creating a pre-split owned path.
///
/// The macro does not parse: every argument is exactly one segment.
///
/// Example: `owned_path!("a.b", "c")` is the path written as `a\.b.c`
#[macro_export]
macro_rules! owned_path {
    ($($segment:expr),* $(,)?) => {{
        let segments: ::std::vec::Vec<$crate::value::KeyString> =
            vec![$($crate::value::KeyString::from($segment),)*];
        $crate::path::OwnedPath::from(segments)
    }};
}

/// Anything that can be turned into a sequence of path segments.
pub trait ValuePath {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError>;
}

impl<T: ValuePath + ?Sized> ValuePath for &T {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        (**self).to_owned_path()
    }
}

impl ValuePath for str {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        Ok(parse_path(self))
    }
}

impl ValuePath for String {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        Ok(parse_path(self))
    }
}

impl ValuePath for OwnedPath {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        Ok(self.clone())
    }
}

impl<S: AsRef<str>> ValuePath for [S] {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        Ok(self.iter().map(|s| KeyString::from(s.as_ref())).collect())
    }
}

impl<S: AsRef<str>, const N: usize> ValuePath for [S; N] {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        self.as_slice().to_owned_path()
    }
}

impl<S: AsRef<str>> ValuePath for Vec<S> {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        self.as_slice().to_owned_path()
    }
}

impl ValuePath for Value {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        let invalid = || InvalidPathTypeSnafu {
            kind: self.kind_str(),
        };

        // Invalid UTF-8 is replaced rather than rejected, same as `Value::as_str`.
        match self {
            Value::Bytes(bytes) => Ok(parse_path(&String::from_utf8_lossy(bytes))),
            Value::Array(array) => array
                .iter()
                .map(|segment| {
                    segment
                        .as_str()
                        .map(KeyString::from)
                        .ok_or_else(|| invalid().build())
                })
                .collect(),
            _ => invalid().fail(),
        }
    }
}

#[cfg(feature = "json")]
impl ValuePath for serde_json::Value {
    fn to_owned_path(&self) -> Result<OwnedPath, PathError> {
        use serde_json::Value as JsonValue;

        fn kind(json: &JsonValue) -> &'static str {
            match json {
                JsonValue::Null => "null",
                JsonValue::Bool(_) => "boolean",
                JsonValue::Number(_) => "number",
                JsonValue::String(_) => "string",
                JsonValue::Array(_) => "array",
                JsonValue::Object(_) => "object",
            }
        }

        match self {
            JsonValue::String(path) => Ok(parse_path(path)),
            JsonValue::Array(array) => array
                .iter()
                .map(|segment| match segment {
                    JsonValue::String(segment) => Ok(KeyString::from(segment.as_str())),
                    _ => InvalidPathTypeSnafu { kind: kind(self) }.fail(),
                })
                .collect(),
            _ => InvalidPathTypeSnafu { kind: kind(self) }.fail(),
        }
    }
}

/// Escapes a single segment so it can be embedded in a dotted path.
#[must_use]
pub fn escape_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains('.') {
        Cow::Owned(segment.replace('.', "\\."))
    } else {
        Cow::Borrowed(segment)
    }
}

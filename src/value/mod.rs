//! The dynamically-typed tree that paths navigate.
//!
//! A [`Value`] is either a container ([`Value::Object`], [`Value::Array`]) or a leaf. Strings
//! are stored as [`bytes::Bytes`] and are always leaves: they are never indexed into, even
//! though they are sequences of characters.

use std::borrow::Cow;
use std::collections::BTreeMap;

use bytes::Bytes;
use ordered_float::NotNan;

mod convert;
#[cfg(feature = "json")]
mod json;
mod keystring;

#[cfg(any(test, feature = "arbitrary"))]
mod arbitrary;

pub use self::keystring::KeyString;

/// The storage type of [`Value::Object`].
pub type ObjectMap = BTreeMap<KeyString, Value>;

/// A node in a tree of values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    /// A string, stored as raw bytes.
    Bytes(Bytes),

    Integer(i64),

    Float(NotNan<f64>),

    Boolean(bool),

    /// A mapping of unique keys to values.
    Object(ObjectMap),

    /// An ordered, 0-indexed sequence of values.
    Array(Vec<Value>),

    #[default]
    Null,
}

impl Value {
    /// A short, human readable name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Null => "null",
        }
    }

    /// Returns `true` for values that can hold children.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether the value is "falsy": the empty string, an empty object or array, zero, `false`
    /// or null. Every other value is truthy.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Integer(int) => *int == 0,
            Self::Float(float) => float.into_inner() == 0.0,
            Self::Boolean(boolean) => !boolean,
            Self::Object(map) => map.is_empty(),
            Self::Array(array) => array.is_empty(),
            Self::Null => true,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectMap> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the string contents of a [`Value::Bytes`]. Invalid UTF-8 sequences are replaced
    /// with `U+FFFD`.
    #[must_use]
    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Bytes(bytes) => Some(String::from_utf8_lossy(bytes)),
            _ => None,
        }
    }
}

/// A macro to easily generate Values
#[macro_export]
macro_rules! value {
    ([]) => ({
        $crate::value::Value::Array(vec![])
    });

    ([$($v:tt),+ $(,)?]) => ({
        let vec: Vec<$crate::value::Value> = vec![$($crate::value!($v)),+];
        $crate::value::Value::Array(vec)
    });

    ({}) => ({
        $crate::value::Value::Object(::std::collections::BTreeMap::default())
    });

    ({$($($k1:literal)? $($k2:ident)?: $v:tt),+ $(,)?}) => ({
        let map = vec![$((String::from($($k1)? $(stringify!($k2))?).into(), $crate::value!($v))),+]
            .into_iter()
            .collect::<$crate::value::ObjectMap>();

        $crate::value::Value::Object(map)
    });

    (null) => ({
        $crate::value::Value::Null
    });

    ($k:expr) => ({
        $crate::value::Value::from($k)
    });
}

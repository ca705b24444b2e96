use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// The key type of objects, and the segment type of paths. Object keys and path segments are
/// the same thing seen from two sides, so they share one type.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct KeyString(String);

impl KeyString {
    /// Is this string empty?
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a reference to the contained string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key as it is written inside a dotted path: every `.` is escaped as `\.`.
    #[must_use]
    pub fn escaped(&self) -> Cow<'_, str> {
        crate::path::escape_segment(&self.0)
    }

    /// Interprets the key as a sequence index.
    pub(crate) fn to_index(&self) -> Result<isize, std::num::ParseIntError> {
        self.0.parse()
    }
}

impl Display for KeyString {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(fmt)
    }
}

impl AsRef<str> for KeyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for KeyString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for KeyString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for KeyString {
    fn eq(&self, that: &str) -> bool {
        self.0[..].eq(that)
    }
}

impl PartialEq<&str> for KeyString {
    fn eq(&self, that: &&str) -> bool {
        self.0[..].eq(*that)
    }
}

impl From<&str> for KeyString {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl From<String> for KeyString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Cow<'_, str>> for KeyString {
    fn from(s: Cow<'_, str>) -> Self {
        Self(s.into())
    }
}

impl From<usize> for KeyString {
    fn from(index: usize) -> Self {
        Self(index.to_string())
    }
}

impl From<KeyString> for String {
    fn from(s: KeyString) -> Self {
        s.0
    }
}

#[cfg(any(test, feature = "arbitrary"))]
impl quickcheck::Arbitrary for KeyString {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        String::arbitrary(g).into()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let s = self.0.to_string();
        Box::new(s.shrink().map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::KeyString;

    #[test]
    fn escaped() {
        assert_eq!(KeyString::from("plain").escaped(), "plain");
        assert_eq!(KeyString::from("a.b").escaped(), "a\\.b");
        assert_eq!(KeyString::from("..").escaped(), "\\.\\.");
        assert_eq!(KeyString::from("a\\b").escaped(), "a\\b");
    }

    #[test]
    fn index() {
        assert_eq!(KeyString::from(3usize).to_index(), Ok(3));
        assert_eq!(KeyString::from("-1").to_index(), Ok(-1));
        assert!(KeyString::from("one").to_index().is_err());
    }
}

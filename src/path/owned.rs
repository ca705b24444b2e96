use std::convert::Infallible;
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::parse_path;
use crate::value::KeyString;

/// A pre-parsed path: an ordered list of segments, starting at the root.
///
/// Serialized as a list of segments, so every path survives a round trip. A dotted string is
/// accepted on input too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "PathRepr", into = "Vec<KeyString>")]
pub struct OwnedPath {
    pub segments: Vec<KeyString>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Segments(Vec<KeyString>),
    Dotted(String),
}

impl From<PathRepr> for OwnedPath {
    fn from(repr: PathRepr) -> Self {
        match repr {
            PathRepr::Segments(segments) => Self { segments },
            PathRepr::Dotted(path) => parse_path(&path),
        }
    }
}

impl OwnedPath {
    /// The path with no segments, pointing at the root itself.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn segments(&self) -> &[KeyString] {
        &self.segments
    }

    pub fn push(&mut self, segment: impl Into<KeyString>) {
        self.segments.push(segment.into());
    }

    #[must_use]
    pub fn with_segment_appended(&self, segment: impl Into<KeyString>) -> Self {
        let mut new_path = self.clone();
        new_path.push(segment);
        new_path
    }

    /// Whether `prefix` names this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// The last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&KeyString> {
        self.segments.last()
    }
}

impl Display for OwnedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i != 0 {
                f.write_char('.')?;
            }
            f.write_str(&segment.escaped())?;
        }
        Ok(())
    }
}

impl FromStr for OwnedPath {
    type Err = Infallible;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(parse_path(src))
    }
}

impl From<String> for OwnedPath {
    fn from(src: String) -> Self {
        parse_path(&src)
    }
}

impl From<&str> for OwnedPath {
    fn from(src: &str) -> Self {
        parse_path(src)
    }
}

impl From<OwnedPath> for Vec<KeyString> {
    fn from(path: OwnedPath) -> Self {
        path.segments
    }
}

impl From<Vec<KeyString>> for OwnedPath {
    fn from(segments: Vec<KeyString>) -> Self {
        Self { segments }
    }
}

impl FromIterator<KeyString> for OwnedPath {
    fn from_iter<I: IntoIterator<Item = KeyString>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a OwnedPath {
    type Item = &'a KeyString;
    type IntoIter = std::slice::Iter<'a, KeyString>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(any(test, feature = "arbitrary"))]
impl quickcheck::Arbitrary for OwnedPath {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Vec::<KeyString>::arbitrary(g).into()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.segments.shrink().map(Self::from))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::owned_path;

    #[test]
    fn display() {
        let test_cases = [
            (owned_path!(), ""),
            (owned_path!("a"), "a"),
            (owned_path!("a", "b", "0"), "a.b.0"),
            (owned_path!("a.b", "c"), r"a\.b.c"),
            (owned_path!("", ""), "."),
            (
                owned_path!("metadata", "annotations", "kluctl.io/hash"),
                r"metadata.annotations.kluctl\.io/hash",
            ),
        ];

        for (path, expected) in test_cases {
            assert_eq!(path.to_string(), expected);
        }
    }

    #[test]
    fn serde() {
        #[derive(Debug, Deserialize, Serialize, PartialEq)]
        struct Config {
            path: OwnedPath,
        }

        let config: Config = serde_json::from_str(r#"{ "path": ["a.b", "c"] }"#).unwrap();
        assert_eq!(config.path, owned_path!("a.b", "c"));

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"path":["a.b","c"]}"#);

        // The dotted form is accepted on input.
        let config: Config = serde_json::from_str(r#"{ "path": "a\\.b.c" }"#).unwrap();
        assert_eq!(config.path, owned_path!("a.b", "c"));
    }

    #[test]
    fn serde_round_trip() {
        let cases = [
            OwnedPath::root(),
            owned_path!(""),
            owned_path!("a\\", "b"),
            owned_path!("x.y", "0", ""),
        ];

        for path in cases {
            let json = serde_json::to_string(&path).unwrap();
            let back: OwnedPath = serde_json::from_str(&json).unwrap();
            assert_eq!(back, path, "{json}");

            let toml = toml::to_string(&Wrapper { path: path.clone() }).unwrap();
            let back: Wrapper = toml::from_str(&toml).unwrap();
            assert_eq!(back.path, path, "{toml}");
        }

        assert_eq!(serde_json::to_string(&OwnedPath::root()).unwrap(), "[]");
    }

    #[derive(Debug, Deserialize, Serialize)]
    struct Wrapper {
        path: OwnedPath,
    }

    #[test]
    fn appending() {
        let mut path = OwnedPath::root();
        assert!(path.is_root());

        path.push("a");
        let appended = path.with_segment_appended(1usize);

        assert_eq!(path.len(), 1);
        assert_eq!(appended, owned_path!("a", "1"));
        assert_eq!(appended.last().map(KeyString::as_str), Some("1"));
    }

    #[test]
    fn starts_with() {
        let path = owned_path!("a", "b", "c");

        assert!(path.starts_with(&OwnedPath::root()));
        assert!(path.starts_with(&owned_path!("a", "b")));
        assert!(path.starts_with(&path));
        assert!(!path.starts_with(&owned_path!("a", "c")));
        assert!(!owned_path!("a").starts_with(&path));
    }
}

use std::borrow::Cow;

use super::OwnedPath;

/// Parses a dotted path into its segments.
///
/// Parsing never fails: every string is a valid path. The empty string is a path with a single,
/// empty segment.
#[must_use]
pub fn parse_path(path: &str) -> OwnedPath {
    Segments::new(path).map(Into::into).collect()
}

/// Lazily splits a dotted path into segments, borrowing from the input whenever a segment
/// contains no escapes.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    remaining: Option<&'a str>,
}

impl<'a> Segments<'a> {
    #[must_use]
    pub const fn new(path: &'a str) -> Self {
        Self {
            remaining: Some(path),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.remaining.take()?;
        let bytes = remaining.as_bytes();
        let mut has_escapes = false;

        for (i, byte) in bytes.iter().enumerate() {
            if *byte != b'.' {
                continue;
            }
            if i > 0 && bytes[i - 1] == b'\\' {
                has_escapes = true;
                continue;
            }

            self.remaining = Some(&remaining[i + 1..]);
            return Some(unescape(&remaining[..i], has_escapes));
        }

        Some(unescape(remaining, has_escapes))
    }
}

fn unescape(segment: &str, has_escapes: bool) -> Cow<'_, str> {
    if has_escapes {
        Cow::Owned(segment.replace("\\.", "."))
    } else {
        Cow::Borrowed(segment)
    }
}

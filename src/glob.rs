//! Shell-style glob patterns, matched against whole strings.
//!
//! | pattern   | matches                                              |
//! |-----------|------------------------------------------------------|
//! | `*`       | any run of characters, including none and dots       |
//! | `?`       | exactly one character                                |
//! | `[abc]`   | one of the listed characters, `[a-z]` ranges allowed |
//! | `[!abc]`  | one character not listed                             |
//!
//! Everything else, `.` and `\` included, matches itself. A `[` with no closing `]` is literal.
//!
//! Classes follow `fnmatch`: a `-` first or last in a class is literal, ranges running backwards
//! (`[z-a]`) are dropped, and a class left with nothing in it never matches.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

#[derive(Clone, Debug, PartialEq, Snafu)]
pub enum PatternError {
    #[snafu(display("Invalid glob pattern {:?}: {}", pattern, source))]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A compiled glob pattern.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobPattern {
    pattern: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    /// Every glob translates to a valid expression, so this only fails when the compiled
    /// pattern exceeds the size limit of the regex engine.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&translate(pattern)).context(InvalidPatternSnafu { pattern })?;

        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether the whole of `subject` matches.
    #[must_use]
    pub fn matches(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for GlobPattern {}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for GlobPattern {
    type Err = PatternError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        Self::new(pattern)
    }
}

impl TryFrom<String> for GlobPattern {
    type Error = PatternError;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::new(&pattern)
    }
}

impl From<GlobPattern> for String {
    fn from(glob: GlobPattern) -> Self {
        glob.pattern
    }
}

/// Translates a glob into an anchored regular expression.
fn translate(pattern: &str) -> String {
    let chars = pattern.chars().collect::<Vec<_>>();
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push_str("(?s)^");

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;

        match c {
            '*' => {
                while chars.get(i) == Some(&'*') {
                    i += 1;
                }
                regex.push_str(".*");
            }
            '?' => regex.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut regex, &chars[i..end]);
                    i = end + 1;
                }
                None => push_literal(&mut regex, '['),
            },
            c => push_literal(&mut regex, c),
        }
    }

    regex.push('$');
    regex
}

/// Finds the `]` closing a class whose body starts at `start`. A `]` right after the opening
/// `[` (or `[!`) is part of the body.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start;
    if chars.get(i) == Some(&'!') {
        i += 1;
    }
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    (i..chars.len()).find(|&j| chars[j] == ']')
}

fn push_class(regex: &mut String, body: &[char]) {
    let (negated, body) = match body.split_first() {
        Some(('!', rest)) => (true, rest),
        _ => (false, body),
    };

    let mut chunks = class_chunks(body);

    // Drop ranges running backwards, along with their endpoints.
    for k in (1..chunks.len()).rev() {
        let reversed = matches!(
            (chunks[k - 1].last(), chunks[k].first()),
            (Some(end), Some(start)) if end > start
        );
        if reversed {
            let next = chunks.remove(k);
            let previous = &mut chunks[k - 1];
            previous.pop();
            previous.extend_from_slice(&next[1..]);
        }
    }

    let mut class = String::new();
    for (k, chunk) in chunks.iter().enumerate() {
        if k > 0 {
            class.push('-');
        }
        for c in chunk {
            push_literal(&mut class, *c);
        }
    }

    match (negated, class.is_empty()) {
        // Nothing left: never matches.
        (false, true) => regex.push_str(r"[^\s\S]"),
        (true, true) => regex.push('.'),
        (false, false) => {
            regex.push('[');
            regex.push_str(&class);
            regex.push(']');
        }
        (true, false) => {
            regex.push_str("[^");
            regex.push_str(&class);
            regex.push(']');
        }
    }
}

/// Splits a class body at the dashes that form ranges. Consecutive chunks are joined by a range
/// from the last character of one to the first character of the next; dashes left inside a
/// chunk are literal.
///
/// The first character is never a range operator, and neither is the character right after a
/// range's end, so `[a-c-e]` is the range `a-c` followed by the literals `-` and `e`.
fn class_chunks(body: &[char]) -> Vec<Vec<char>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut search = 1;

    while let Some(dash) = body
        .get(search..)
        .and_then(|rest| rest.iter().position(|c| *c == '-'))
        .map(|offset| search + offset)
    {
        chunks.push(body[start..dash].to_vec());
        start = dash + 1;
        search = dash + 3;
    }

    match &body[start..] {
        [] => {
            // A trailing dash is literal.
            if let Some(last) = chunks.last_mut() {
                last.push('-');
            }
        }
        rest => chunks.push(rest.to_vec()),
    }

    chunks
}

fn push_literal(regex: &mut String, c: char) {
    regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
}

//! This module describes locations in the source code the tree was produced from. There are two
//! types of absolute positions using indexes in the raw string that are [Byte] and [ByteRange].
//! There are also two types of positions that are [Point] and [Range] that have line and column
//! numbers instead as a better way to generate error messages.
//!
//! The checker never reads source text itself, locations are carried by the tree so diagnostics
//! can point back to whatever the producer of the tree parsed.

use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Byte position in a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Byte(pub usize);

impl Byte {
    /// Discovers a [Point] that is a line and column structure using the index inside the source
    /// code. Columns count characters, and `\r\n` terminators are skipped whole. Offsets past the
    /// end of the code locate at the end of the last line.
    pub fn locate(&self, code: &str) -> Point {
        let mut acc = 0;
        let mut last = Point::default();

        for (line, text) in code.split_inclusive('\n').enumerate() {
            let content = text.trim_end_matches(['\r', '\n']);

            if self.0 < acc + text.len() {
                let offset = self.0 - acc;
                let column = content
                    .char_indices()
                    .take_while(|(index, _)| *index < offset)
                    .count();
                return Point { line, column };
            }

            acc += text.len();
            last = Point {
                line,
                column: content.chars().count(),
            };
        }

        last
    }
}

/// Two byte positions inside a source file. Serialized as a `[start, end]` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ByteRange(pub Byte, pub Byte);

impl ByteRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self(Byte(start), Byte(end))
    }

    pub fn locate(&self, code: &str) -> Range {
        Range(self.0.locate(code), self.1.locate(code))
    }

    /// A range that points to nothing, used for synthesized nodes.
    pub fn is_empty(&self) -> bool {
        self.0 == self.1
    }
}

impl Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.0 .0, self.1 .0)
    }
}

/// Line and column position inside a source file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

/// Two line and column positions ([Point]s) inside a source file.
#[derive(Debug, PartialEq, Eq)]
pub struct Range(pub Point, pub Point);

impl Range {
    /// Creates a new range using two byte positions.
    pub fn new(start: usize, end: usize, code: &str) -> Self {
        Self(Byte(start).locate(code), Byte(end).locate(code))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 != self.1 {
            write!(f, "{}~{}", self.0, self.1)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Some data together with the place it came from. The location is optional on the wire and
/// defaults to an empty range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located<T> {
    #[serde(default, skip_serializing_if = "ByteRange::is_empty")]
    pub location: ByteRange,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl<T> Located<T> {
    pub const fn new(location: ByteRange, data: T) -> Self {
        Self { location, data }
    }

    /// Wraps data that has no place in any source file.
    pub fn synthesized(data: T) -> Self {
        Self::new(ByteRange::default(), data)
    }
}

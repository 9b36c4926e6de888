//! Dotted field paths

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between path segments.
pub const SEPARATOR: char = '.';

/// A parsed dotted path such as `company.address.street`.
///
/// Parsing splits on every `.` and keeps empty segments, so `a..b` has three
/// segments and the empty string has one. A path therefore always has at
/// least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Path segments in traversal order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the path has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when the path descends into a nested record
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// First segment
    pub fn head(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// Last segment, the key that holds the value
    pub fn leaf(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// The path without its first segment, if it has more than one
    pub fn tail(&self) -> Option<FieldPath> {
        if self.is_nested() {
            Some(Self {
                segments: self.segments[1..].to_vec(),
            })
        } else {
            None
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<&String> for FieldPath {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}

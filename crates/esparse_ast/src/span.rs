//! Node locations and their ESTree serialization.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A 1-based line and 0-based column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// The ESTree `loc` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

/// The location of a node.
///
/// `start`/`end` are always tracked; they are only written out when
/// `ranges` is set, and `loc` only when it was computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub loc: Option<SourceLocation>,
    pub ranges: bool,
}

impl Span {
    /// A bare span that serializes no location fields.
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start,
            end,
            loc: None,
            ranges: false,
        }
    }

    pub fn text_span(&self) -> esparse_core::TextSpan {
        esparse_core::TextSpan::new(self.start, self.end)
    }
}

/// Serialized as a flattened map so every node carries `start`, `end` and
/// `loc` directly next to its own fields.
impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.ranges {
            map.serialize_entry("start", &self.start)?;
            map.serialize_entry("end", &self.end)?;
        }
        if let Some(loc) = &self.loc {
            map.serialize_entry("loc", loc)?;
        }
        map.end()
    }
}

use std::fmt;

use line_col::LineColLookup;

/// Zero based line and column of a byte offset in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    /// One based, the way editors show it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Map a byte offset to a [Position]
///
/// Offsets past the end of the source are clamped to the end.
pub fn index_to_position(source: &str, index: usize) -> Position {
    let lookup = LineColLookup::new(source);

    let (line, column) = lookup.get(index.min(source.len()));

    Position {
        line: line - 1,
        column: column - 1,
    }
}

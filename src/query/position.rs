//! Byte offset to line/column conversion for error locations.
//!
//! Error positions are computed lazily: a parse only ever resolves the one
//! or two offsets its failure points at, so the cache scans forward from
//! the nearest previously resolved offset instead of precomputing line
//! starts for the whole input. The cache belongs to a single parse
//! invocation and is dropped with it.

use serde::Serialize;
use std::fmt;

/// A point in the input: byte offset plus 1-based line and column.
///
/// Lines split on `\n`; every other character, including `\r`, advances the
/// column by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The input range a syntax error points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Lazily extended offset → line/column cache for one parse invocation.
#[derive(Debug)]
pub struct PositionCache<'a> {
    input: &'a str,
    /// Resolved positions, kept sorted by offset. Offset 0 is always present.
    resolved: Vec<Position>,
}

impl<'a> PositionCache<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            resolved: vec![Position::new(0, 1, 1)],
        }
    }

    /// Line/column details for a byte offset.
    ///
    /// Scans forward from the nearest offset resolved earlier and caches
    /// the result, so repeated lookups within one parse stay cheap.
    pub fn position(&mut self, offset: usize) -> Position {
        let slot = match self.resolved.binary_search_by_key(&offset, |p| p.offset) {
            Ok(found) => return self.resolved[found],
            Err(slot) => slot,
        };
        // slot >= 1 because offset 0 is seeded at construction
        let mut current = self.resolved[slot - 1];
        for ch in self.input[current.offset..offset].chars() {
            current.offset += ch.len_utf8();
            if ch == '\n' {
                current.line += 1;
                current.column = 1;
            } else {
                current.column += 1;
            }
        }
        self.resolved.insert(slot, current);
        current
    }

    /// Start/end details for a byte range.
    pub fn location(&mut self, start: usize, end: usize) -> Location {
        Location {
            start: self.position(start),
            end: self.position(end),
        }
    }
}

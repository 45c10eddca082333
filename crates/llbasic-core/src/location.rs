//! Source location tracking for error reporting.
//!
//! Provides [`Location`] to track where tokens, nodes and failures originate.

use std::fmt;

/// A position in llbasic source code.
///
/// Tokens remember where they start; IR nodes inherit the location of the
/// token they were built from so every pass can blame the right line.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Location {
    /// Line number (1-indexed, 0 when unknown).
    pub line: u32,
    /// Column number (1-indexed, 0 when unknown).
    pub column: u32,
}

impl Location {
    /// Create a location from a line and column.
    #[inline]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Whether this location points at real source text.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.line != 0
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display() {
        let loc = Location::new(3, 15);
        assert_eq!(format!("{}", loc), "3:15");
        assert_eq!(format!("{:?}", loc), "3:15");
    }

    #[test]
    fn default_location_is_unknown() {
        assert!(!Location::default().is_known());
        assert!(Location::new(1, 1).is_known());
    }

    #[test]
    fn locations_order_by_line_then_column() {
        assert!(Location::new(1, 9) < Location::new(2, 1));
        assert!(Location::new(2, 1) < Location::new(2, 4));
    }
}

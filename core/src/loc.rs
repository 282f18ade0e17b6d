//! Source positions attached to every node.

use core::fmt;

/// Index of a source file in the driver's file table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u16);

/// A position in the program text.
///
/// Positions are carried verbatim through cloning and only ever read for
/// diagnostics. `SourceLoc::default()` is the unknown position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLoc {
    pub file: FileId,
    pub line: u32,
    pub col: u32,
}

impl SourceLoc {
    pub const UNKNOWN: SourceLoc = SourceLoc {
        file: FileId(0),
        line: 0,
        col: 0,
    };

    pub fn new(file: FileId, line: u32, col: u32) -> Self {
        Self { file, line, col }
    }

    /// Shorthand for a position in file 0, handy in tests and examples.
    pub fn at(line: u32, col: u32) -> Self {
        Self::new(FileId(0), line, col)
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}:{}:{}", self.file.0, self.line, self.col)
    }
}

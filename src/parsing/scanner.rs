//! Structural line classification and block-boundary queries.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Line;
use crate::{Error, Result};

/// An unindented keyword, one whitespace character and `{`, e.g. `Frames {`.
static BLOCK_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+\s\{$").unwrap());

static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\}$").unwrap());

/// `name: number, name[, name...] {`, e.g. `  VL1_CEM_Frm1: 1, CEM, 2 {`.
static FRAME_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Za-z0-9_]+:[\d\sA-Za-z,_]+\{$").unwrap());

/// Structural role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a top-level section (`Signals {`).
    BlockStart,
    /// A lone closing brace.
    BlockClose,
    /// Opens a frame definition.
    FrameHeader,
    /// Any other line ending in `{`, e.g. a schedule table name.
    NestedOpen,
    Content,
}

impl LineKind {
    pub fn classify(text: &str) -> Self {
        if BLOCK_CLOSE.is_match(text) {
            LineKind::BlockClose
        } else if BLOCK_START.is_match(text) {
            LineKind::BlockStart
        } else if FRAME_HEADER.is_match(text) {
            LineKind::FrameHeader
        } else if text.ends_with('{') {
            LineKind::NestedOpen
        } else {
            LineKind::Content
        }
    }

    /// Returns true for lines that open an entry inside a section: every kind
    /// ending in `{` except a section block-start.
    #[inline]
    pub fn opens_entry(self) -> bool {
        matches!(self, LineKind::FrameHeader | LineKind::NestedOpen)
    }
}

/// How many closing braces in a row terminate a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    Single = 1,
    Double = 2,
    Triple = 3,
}

/// Classified view over a preprocessed line sequence.
///
/// Classification happens once, in [`Scanner::new`]. The scanner borrows the
/// lines and lives only for the duration of one parse.
#[derive(Debug)]
pub struct Scanner<'a> {
    lines: &'a [Line],
    kinds: Vec<LineKind>,
}

impl<'a> Scanner<'a> {
    pub fn new(lines: &'a [Line]) -> Self {
        let kinds = lines.iter().map(|l| LineKind::classify(&l.text)).collect();
        Self { lines, kinds }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`. Panics if `index` is out of range.
    pub fn line(&self, index: usize) -> &'a Line {
        &self.lines[index]
    }

    /// The kind of the line at `index`, or `None` past the end of input.
    pub fn kind(&self, index: usize) -> Option<LineKind> {
        self.kinds.get(index).copied()
    }

    #[inline]
    fn is_close(&self, index: usize) -> bool {
        self.kind(index) == Some(LineKind::BlockClose)
    }

    #[inline]
    fn is_block_start(&self, index: usize) -> bool {
        self.kind(index) == Some(LineKind::BlockStart)
    }

    /// Smallest index greater than `index` that holds a closing brace.
    ///
    /// A section block-start before that brace means the block at `index` is
    /// never closed.
    pub fn next_close(&self, index: usize) -> Result<usize> {
        for i in index + 1..self.len() {
            if self.is_close(i) {
                return Ok(i);
            }
            if self.is_block_start(i) {
                break;
            }
        }
        Err(self.unterminated(index))
    }

    /// Smallest index at or after `index` that starts a run of `nesting`
    /// consecutive closing braces. Like [`Scanner::next_close`], the search
    /// stops at the next section block-start.
    pub fn end_of_block(&self, index: usize, nesting: Nesting) -> Result<usize> {
        let run = nesting as usize;
        for i in index..self.len() {
            if self.is_block_start(i) || i + run > self.len() {
                break;
            }
            if (i..i + run).all(|j| self.is_close(j)) {
                return Ok(i);
            }
        }
        Err(self.unterminated(index))
    }

    /// Error for a block opened at `index` whose end was never found.
    pub fn unterminated(&self, index: usize) -> Error {
        let (line, text) = self.describe(index);
        Error::Structural {
            line,
            text,
            reason: "block is never closed",
        }
    }

    /// Error for a line at `index` that does not have the expected shape.
    pub fn tokenization(&self, index: usize, reason: impl Into<String>) -> Error {
        let (line, text) = self.describe(index);
        Error::Tokenization {
            line,
            text,
            reason: reason.into(),
        }
    }

    /// Error for a name at `index` that already exists in `section`.
    pub fn duplicate(&self, index: usize, section: &'static str, key: impl Into<String>) -> Error {
        let (line, text) = self.describe(index);
        Error::DuplicateEntry {
            section,
            key: key.into(),
            line,
            text,
        }
    }

    // Queries can run past the last line; report the last line then.
    fn describe(&self, index: usize) -> (usize, String) {
        match self.lines.get(index).or_else(|| self.lines.last()) {
            Some(l) => (l.number, l.text.clone()),
            None => (0, String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Line {
                number: i + 1,
                text: t.to_string(),
            })
            .collect()
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(LineKind::classify("Signals {"), LineKind::BlockStart);
        assert_eq!(LineKind::classify("  }"), LineKind::BlockClose);
        assert_eq!(LineKind::classify("}"), LineKind::BlockClose);
        assert_eq!(
            LineKind::classify("\tAQSe_01: 10, Klima_LIN1, 6 {"),
            LineKind::FrameHeader
        );
        assert_eq!(LineKind::classify("  MasterReq: 0x3c {"), LineKind::FrameHeader);
        assert_eq!(LineKind::classify("  Table1 {"), LineKind::NestedOpen);
        assert_eq!(LineKind::classify("  Sig1: 8, 0, A, B ;"), LineKind::Content);
        // the keyword must start the line and be followed by one whitespace
        assert_eq!(LineKind::classify("  Signals {"), LineKind::NestedOpen);
        assert_eq!(LineKind::classify("Signals{"), LineKind::NestedOpen);
        assert!(LineKind::NestedOpen.opens_entry());
        assert!(LineKind::FrameHeader.opens_entry());
        assert!(!LineKind::BlockStart.opens_entry());
    }

    #[test]
    fn next_close_is_strictly_after() -> Result<()> {
        let ls = lines(&["Schedule_tables {", "  T1 {", "  }", "}"]);
        let scanner = Scanner::new(&ls);
        assert_eq!(scanner.next_close(0)?, 2);
        assert_eq!(scanner.next_close(2)?, 3);
        Ok(())
    }

    #[test]
    fn queries_stop_at_the_next_section() {
        let ls = lines(&[
            "Signals {",
            "  SigA: 8, 0, M, S ;",
            "Frames {",
            "  F1: 1, M, 1 {",
            "  }",
            "}",
        ]);
        let scanner = Scanner::new(&ls);
        assert!(matches!(
            scanner.next_close(0),
            Err(Error::Structural { line: 1, .. })
        ));
        assert!(matches!(
            scanner.end_of_block(1, Nesting::Double),
            Err(Error::Structural { line: 2, .. })
        ));
        assert_eq!(scanner.end_of_block(3, Nesting::Double).ok(), Some(4));
    }

    #[test]
    fn end_of_block_finds_runs() -> Result<()> {
        let ls = lines(&[
            "Node_attributes {",
            "  Slave1 {",
            "    configurable_frames {",
            "      Frame1 = 0x10;",
            "    }",
            "  }",
            "}",
        ]);
        let scanner = Scanner::new(&ls);
        assert_eq!(scanner.end_of_block(1, Nesting::Single)?, 4);
        assert_eq!(scanner.end_of_block(1, Nesting::Double)?, 4);
        assert_eq!(scanner.end_of_block(1, Nesting::Triple)?, 4);
        assert_eq!(scanner.end_of_block(5, Nesting::Double)?, 5);
        Ok(())
    }

    #[test]
    fn exhausted_queries_are_structural_errors() {
        let ls = lines(&["Signals {", "  Sig1: 8, 0, A, B ;"]);
        let scanner = Scanner::new(&ls);
        match scanner.next_close(0) {
            Err(Error::Structural { line, text, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(text, "Signals {");
            }
            other => panic!("expected structural error, got {other:?}"),
        }
        assert!(scanner.end_of_block(0, Nesting::Triple).is_err());
        assert!(scanner.end_of_block(5, Nesting::Single).is_err());
    }
}

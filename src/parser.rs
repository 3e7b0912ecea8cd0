//! The driver that turns a line sequence into a [`Document`].
//!
//! # Example
//!
//! ```no_run
//! use ldf_rs::{LdfParser, SectionKind};
//!
//! // Default options: lenient about unknown sections
//! let document = LdfParser::from_file("body.ldf")?.parse_all()?;
//!
//! // Only frames and signals, failing on sections the parser does not know
//! let parser = LdfParser::builder()
//!     .strict_sections(true)
//!     .only_sections([SectionKind::Frames, SectionKind::Signals])
//!     .from_file("body.ldf")?;
//! let subset = parser.parse_all()?;
//! # Ok::<(), ldf_rs::Error>(())
//! ```

mod builder;

pub use builder::{LdfParserBuilder, ParseOptions};

use tracing::{debug, trace, warn};

use crate::{
    Document, Error, Result,
    parsing::{Line, LineKind, Scanner, SectionKind, assign_header, preprocess},
};

/// An LDF ready to be parsed.
///
/// Holds the preprocessed lines and the options they were read with. Parsing
/// does not modify the parser, so [`LdfParser::parse_all`] can be called any
/// number of times and always yields an equal, independent [`Document`].
#[derive(Debug, Clone)]
pub struct LdfParser {
    lines: Vec<Line>,
    options: ParseOptions,
}

impl LdfParser {
    /// Create a parser over already split lines with default options.
    ///
    /// # Returns
    /// [`Error::Format`] if a line holds binary content.
    pub fn build<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_options(lines, ParseOptions::default())
    }

    /// Create a parser over already split lines.
    pub fn with_options<I, S>(lines: I, options: ParseOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = preprocess(lines, &options)?;
        debug!(lines = lines.len(), "preprocessed LDF");
        Ok(Self { lines, options })
    }

    /// Create a parser over a complete LDF text with default options.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::builder().from_text(text)
    }

    /// Create a parser over raw bytes (UTF-8, falling back to Latin-1).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::builder().from_bytes(bytes)
    }

    /// Read and preprocess the LDF at `path`.
    ///
    /// # Arguments
    /// * `path` - Path to the `.ldf` file.
    pub fn from_file(path: &str) -> Result<Self> {
        Self::builder().from_file(path)
    }

    pub fn builder() -> LdfParserBuilder {
        LdfParserBuilder::new()
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// The preprocessed lines, comment header and blank lines removed.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Parse every section into a fresh [`Document`].
    ///
    /// Block-starts are matched against the known section keywords; unknown
    /// ones are skipped unless strict mode is on. Top-level `key = value;`
    /// lines fill the [`Header`](crate::Header).
    ///
    /// # Errors
    /// The first structural, tokenization or duplicate-entry problem aborts the
    /// parse.
    pub fn parse_all(&self) -> Result<Document> {
        let scanner = Scanner::new(&self.lines);
        let mut document = Document::default();

        // Brace depth outside the extracted sections, and where the outermost
        // open block started.
        let mut depth = 0usize;
        let mut outer_open = 0usize;

        let mut index = 0;
        while index < scanner.len() {
            let line = scanner.line(index);
            let kind = scanner.kind(index);

            if depth == 0 && kind == Some(LineKind::BlockStart) {
                let keyword = line.text.split_whitespace().next().unwrap_or_default();
                match SectionKind::from_keyword(keyword) {
                    Some(section) if self.options.wants(section) => {
                        trace!(%section, line = line.number, "extracting section");
                        index = section.extract(&scanner, index, &mut document)? + 1;
                        continue;
                    }
                    Some(section) => debug!(%section, "section not selected, skipping"),
                    None if self.options.strict_sections => {
                        return Err(Error::UnknownSection {
                            keyword: keyword.to_string(),
                            line: line.number,
                            text: line.text.clone(),
                        });
                    }
                    None => debug!(keyword, line = line.number, "skipping unknown section"),
                }
            } else if depth == 0 && kind.is_some_and(LineKind::opens_entry) {
                // `Frames  {`, `Frames{` or an indented keyword: not a section start
                let keyword = line.text.split(['{', ':']).next().unwrap_or_default().trim();
                if self.options.strict_sections {
                    return Err(scanner.tokenization(index, "expected `Section_name {` at top level"));
                }
                if SectionKind::from_keyword(keyword).is_some() {
                    warn!(keyword, line = line.number, "malformed section header, skipping");
                } else {
                    debug!(keyword, line = line.number, "skipping unknown block");
                }
            } else if depth == 0 && kind == Some(LineKind::Content) {
                assign_header(&mut document.header, line);
            }

            if depth == 0 {
                outer_open = index;
            }
            depth = brace_depth(depth, &line.text);
            index += 1;
        }

        if depth != 0 {
            return Err(scanner.unterminated(outer_open));
        }
        Ok(document)
    }
}

/// Depth after applying every brace on `text`. Stray closing braces at depth
/// zero are ignored.
fn brace_depth(depth: usize, text: &str) -> usize {
    text.chars().fold(depth, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth.saturating_sub(1),
        _ => depth,
    })
}

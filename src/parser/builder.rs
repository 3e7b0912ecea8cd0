//! Builder pattern for LdfParser configuration.

use super::LdfParser;
use crate::{Result, parsing::SectionKind};

/// Configuration for LdfParser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Skip the leading comment header (one line per line containing `/*`).
    /// Default: true
    pub skip_comment_header: bool,

    /// Cut `//` comments off every line before classification.
    /// Default: true
    pub strip_line_comments: bool,

    /// Fail with [`Error::UnknownSection`](crate::Error::UnknownSection) on
    /// block keywords the parser does not extract.
    /// Default: false (unknown sections are skipped)
    pub strict_sections: bool,

    /// Extract only these sections; the rest are skipped like unknown ones.
    /// Default: None (all sections)
    pub only_sections: Option<Vec<SectionKind>>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            skip_comment_header: true,
            strip_line_comments: true,
            strict_sections: false,
            only_sections: None,
        }
    }
}

impl ParseOptions {
    /// Whether `kind` should be extracted.
    pub fn wants(&self, kind: SectionKind) -> bool {
        self.only_sections
            .as_ref()
            .is_none_or(|only| only.contains(&kind))
    }
}

/// Builder for LdfParser configuration.
#[derive(Debug, Clone, Default)]
pub struct LdfParserBuilder {
    pub(super) options: ParseOptions,
}

impl LdfParserBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to skip the leading comment header.
    ///
    /// The header length is the number of lines containing `/*` anywhere in
    /// the file, so files with comment blocks below the header lose lines when
    /// this is on.
    ///
    /// Default: true
    pub fn skip_comment_header(mut self, enabled: bool) -> Self {
        self.options.skip_comment_header = enabled;
        self
    }

    /// Set whether to strip `//` line comments.
    ///
    /// Default: true
    pub fn strip_line_comments(mut self, enabled: bool) -> Self {
        self.options.strip_line_comments = enabled;
        self
    }

    /// Set whether unknown block keywords are an error.
    ///
    /// Default: false
    pub fn strict_sections(mut self, enabled: bool) -> Self {
        self.options.strict_sections = enabled;
        self
    }

    /// Restrict extraction to the given sections.
    pub fn only_sections(mut self, sections: impl IntoIterator<Item = SectionKind>) -> Self {
        self.options.only_sections = Some(sections.into_iter().collect());
        self
    }

    /// Build a parser over already split lines.
    pub fn build<I, S>(self, lines: I) -> Result<LdfParser>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LdfParser::with_options(lines, self.options)
    }

    /// Build a parser over a complete LDF text.
    pub fn from_text(self, text: &str) -> Result<LdfParser> {
        self.build(strip_bom(text).lines())
    }

    /// Build a parser over raw bytes.
    ///
    /// UTF-8 is tried first; anything else is read as Latin-1, which maps
    /// every byte to a character.
    pub fn from_bytes(self, bytes: &[u8]) -> Result<LdfParser> {
        match core::str::from_utf8(bytes) {
            Ok(text) => self.from_text(text),
            Err(_) => {
                tracing::debug!("input is not UTF-8, decoding as Latin-1");
                let text: String = bytes.iter().map(|&b| char::from(b)).collect();
                self.from_text(&text)
            }
        }
    }

    /// Build a parser over the LDF at `path`.
    pub fn from_file(self, path: &str) -> Result<LdfParser> {
        let bytes = std::fs::read(path)?;
        self.from_bytes(&bytes)
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

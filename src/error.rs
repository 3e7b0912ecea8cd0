//! Error types for LDF parsing.
//!
//! This module defines the [`Error`] enum which represents every failure that
//! can occur while turning LDF text into a [`Document`](crate::Document).
//! Every parse error is fatal: no partially populated document is returned.
//!
//! # Example
//!
//! ```no_run
//! use ldf_rs::{ErrorKind, LdfParser};
//!
//! fn load(path: &str) -> ldf_rs::Result<()> {
//!     let parser = LdfParser::from_file(path)?;
//!     match parser.parse_all() {
//!         Ok(document) => {
//!             println!("{} frames", document.frames().len());
//!             Ok(())
//!         }
//!         Err(e) if e.kind() == ErrorKind::Structural => {
//!             eprintln!("broken block structure at line {:?}", e.line());
//!             Err(e)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur while loading or parsing an LDF.
///
/// Line numbers are 1-based and refer to the physical line in the source text,
/// so they survive blank-line and comment-header removal.
#[derive(Debug, Error)]
pub enum Error {
    /// The source could not be read as a sequence of text lines.
    #[error("line {line}: source is not LDF text: {reason}")]
    Format {
        /// Line where the unreadable content was found
        line: usize,
        /// What made the line unreadable
        reason: String,
    },

    /// A block was opened but never terminated, or a boundary query ran past
    /// the end of the input.
    #[error("line {line}: {reason}: `{text}`")]
    Structural {
        /// Line of the block that could not be closed
        line: usize,
        /// Raw text of that line
        text: String,
        /// Description of the failed boundary query
        reason: &'static str,
    },

    /// A data line did not split into the expected fields, or a numeric field
    /// held no digits.
    #[error("line {line}: {reason}: `{text}`")]
    Tokenization {
        /// Offending line
        line: usize,
        /// Raw text of the offending line
        text: String,
        /// What was expected
        reason: String,
    },

    /// A name appeared twice within one section.
    #[error("line {line}: duplicate {section} entry `{key}`: `{text}`")]
    DuplicateEntry {
        /// Section the entry belongs to
        section: &'static str,
        /// The repeated name
        key: String,
        /// Line of the second occurrence
        line: usize,
        /// Raw text of that line
        text: String,
    },

    /// A block keyword that the parser does not extract. Only raised when
    /// [`ParseOptions::strict_sections`](crate::ParseOptions::strict_sections) is set.
    #[error("line {line}: unknown section `{keyword}`")]
    UnknownSection {
        /// The unrecognized keyword
        keyword: String,
        /// Line of the block-start
        line: usize,
        /// Raw text of that line
        text: String,
    },

    /// An I/O error occurred while reading an LDF or a JSON export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization of a [`Document`](crate::Document) failed.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Structural,
    Tokenization,
    Duplicate,
    UnknownSection,
    Io,
    Json,
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Format { .. } => ErrorKind::Format,
            Error::Structural { .. } => ErrorKind::Structural,
            Error::Tokenization { .. } => ErrorKind::Tokenization,
            Error::DuplicateEntry { .. } => ErrorKind::Duplicate,
            Error::UnknownSection { .. } => ErrorKind::UnknownSection,
            Error::Io(_) => ErrorKind::Io,
            #[cfg(feature = "serde")]
            Error::Json(_) => ErrorKind::Json,
        }
    }

    /// The 1-based source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Format { line, .. }
            | Error::Structural { line, .. }
            | Error::Tokenization { line, .. }
            | Error::DuplicateEntry { line, .. }
            | Error::UnknownSection { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Raw text of the offending line, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Error::Structural { text, .. }
            | Error::Tokenization { text, .. }
            | Error::DuplicateEntry { text, .. }
            | Error::UnknownSection { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A specialized Result type for LDF operations.
pub type Result<T> = core::result::Result<T, Error>;

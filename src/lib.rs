#![forbid(unsafe_code)]

//! # ldf-rs
//!
//! A Rust library for reading LIN Description Files (LDF, ISO 17987-2).
//!
//! An LDF describes a LIN cluster: its master and slave nodes, the signals
//! they exchange, the frames carrying those signals, per-node diagnostic
//! configuration, schedule tables and signal encodings. This crate turns the
//! text into a [`Document`] for code generators, simulators and test benches.
//!
//! ## Features
//!
//! - **Sections**: `Nodes`, `Signals`, `Diagnostic_signals`, `Frames`,
//!   `Diagnostic_frames`, `Node_attributes`, `Schedule_tables`,
//!   `Signal_encoding_types` and `Signal_representation`
//! - **Header**: protocol/language version, bus speed and channel name
//! - **Strict or lenient**: unknown sections are skipped by default, or rejected
//! - **Serde**: optional JSON export of the parsed document
//!
//! The parser does not check references between sections (a frame's publisher
//! need not appear in `Nodes`) and never writes LDF text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ldf_rs::{LdfParser, Result};
//!
//! fn main() -> Result<()> {
//!     let document = LdfParser::from_file("body.ldf")?.parse_all()?;
//!
//!     if let Some(nodes) = document.nodes() {
//!         println!("Master {} with {} slaves", nodes.master, nodes.slaves.len());
//!     }
//!     for (name, frame) in document.frames() {
//!         println!("{name}: id {:#04x}, {} signals", frame.identifier, frame.signals.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`parser`] | The driver, [`LdfParser`] and its options |
//! | [`parsing`] | Line preprocessing, classification and section extractors |
//! | [`types`] | Section record types |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Every parse error carries the
//! 1-based line number and raw text of the offending line; see [`Error`].

pub mod error;
pub mod parser;
pub mod parsing;
pub mod types;

mod document;
mod section_map;

// Re-export commonly used types at the crate root
pub use document::Document;
pub use error::{Error, ErrorKind, Result};
pub use parser::{LdfParser, LdfParserBuilder, ParseOptions};
pub use parsing::SectionKind;
pub use section_map::SectionMap;
pub use types::{
    DiagnosticFrame, DiagnosticSignal, Frame, Header, InitValue, NodeAttribute, NodeSection,
    ScheduleSlot, ScheduleTable, Signal, SignalEncodingType,
};

/// Parse a complete LDF text with default options.
pub fn parse(text: &str) -> Result<Document> {
    LdfParser::from_text(text)?.parse_all()
}

/// Parse the LDF at `path` with default options.
pub fn parse_file(path: &str) -> Result<Document> {
    LdfParser::from_file(path)?.parse_all()
}

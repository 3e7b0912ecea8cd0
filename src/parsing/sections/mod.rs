//! Per-section extractors.
//!
//! Every extractor receives the index of its section's opening line, walks the
//! block, inserts its records into the [`Document`] and returns the index of
//! the line that closes the section.

mod encoding;
mod frames;
mod node_attributes;
mod nodes;
mod schedule_tables;
mod signals;

use core::fmt;

use super::{LineKind, Nesting, Scanner};
use crate::{Document, Result, SectionMap};

/// The LDF sections this crate extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectionKind {
    Nodes,
    Signals,
    DiagnosticSignals,
    Frames,
    DiagnosticFrames,
    NodeAttributes,
    ScheduleTables,
    SignalEncodingTypes,
    SignalRepresentation,
}

impl SectionKind {
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Nodes,
        SectionKind::Signals,
        SectionKind::DiagnosticSignals,
        SectionKind::Frames,
        SectionKind::DiagnosticFrames,
        SectionKind::NodeAttributes,
        SectionKind::ScheduleTables,
        SectionKind::SignalEncodingTypes,
        SectionKind::SignalRepresentation,
    ];

    /// The block keyword as written in an LDF.
    pub fn keyword(self) -> &'static str {
        match self {
            SectionKind::Nodes => "Nodes",
            SectionKind::Signals => "Signals",
            SectionKind::DiagnosticSignals => "Diagnostic_signals",
            SectionKind::Frames => "Frames",
            SectionKind::DiagnosticFrames => "Diagnostic_frames",
            SectionKind::NodeAttributes => "Node_attributes",
            SectionKind::ScheduleTables => "Schedule_tables",
            SectionKind::SignalEncodingTypes => "Signal_encoding_types",
            SectionKind::SignalRepresentation => "Signal_representation",
        }
    }

    /// Exact, case-sensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    pub(crate) fn extract(self, scanner: &Scanner<'_>, open: usize, doc: &mut Document) -> Result<usize> {
        match self {
            SectionKind::Nodes => nodes::extract(scanner, open, doc),
            SectionKind::Signals => signals::extract_signals(scanner, open, doc),
            SectionKind::DiagnosticSignals => signals::extract_diagnostic_signals(scanner, open, doc),
            SectionKind::Frames => frames::extract_frames(scanner, open, doc),
            SectionKind::DiagnosticFrames => frames::extract_diagnostic_frames(scanner, open, doc),
            SectionKind::NodeAttributes => node_attributes::extract(scanner, open, doc),
            SectionKind::ScheduleTables => schedule_tables::extract(scanner, open, doc),
            SectionKind::SignalEncodingTypes => encoding::extract_encoding_types(scanner, open, doc),
            SectionKind::SignalRepresentation => encoding::extract_representation(scanner, open, doc),
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Insert into `map`, turning a rejected key into a duplicate-entry error for
/// the line at `index`.
fn insert<V>(
    map: &mut SectionMap<V>,
    key: String,
    value: V,
    scanner: &Scanner<'_>,
    index: usize,
    section: &'static str,
) -> Result<()> {
    if map.insert_unique(key.clone(), value) {
        Ok(())
    } else {
        Err(scanner.duplicate(index, section, key))
    }
}

/// Closing line of a section whose entries are blocks themselves.
///
/// The section ends at the second of two consecutive closing braces: the last
/// entry's close followed by the section's own. An empty section closes on the
/// line right after the opener.
fn nested_section_close(scanner: &Scanner<'_>, open: usize) -> Result<usize> {
    match scanner.kind(open + 1) {
        Some(LineKind::BlockClose) => Ok(open + 1),
        Some(_) => scanner
            .end_of_block(open + 1, Nesting::Double)
            .map(|first| first + 1)
            .map_err(|_| scanner.unterminated(open)),
        None => Err(scanner.unterminated(open)),
    }
}

use tracing::debug;

use super::insert;
use crate::{
    Document, Result, SectionMap,
    parsing::{LineKind, Nesting, Scanner, tokens},
    types::{DiagnosticFrame, Frame},
};

/// Walk a block of frame definitions.
///
/// Each frame header must split into at least `min_fields` fields. A closing
/// brace seen outside any frame ends the enclosing block.
fn walk_frames(
    scanner: &Scanner<'_>,
    open: usize,
    min_fields: usize,
    expected: &'static str,
    mut on_frame: impl FnMut(usize, Vec<String>, SectionMap<String>) -> Result<()>,
) -> Result<usize> {
    let mut index = open + 1;
    loop {
        match scanner.kind(index) {
            None | Some(LineKind::BlockStart) => return Err(scanner.unterminated(open)),
            Some(LineKind::BlockClose) => return Ok(index),
            Some(LineKind::FrameHeader) => {}
            Some(_) => return Err(scanner.tokenization(index, expected)),
        }
        let header = tokens::split_fields(&scanner.line(index).text)
            .filter(|fields| fields.len() >= min_fields)
            .ok_or_else(|| scanner.tokenization(index, expected))?;

        let end = scanner
            .end_of_block(index + 1, Nesting::Single)
            .map_err(|_| scanner.unterminated(index))?;
        let signals = frame_signals(scanner, index + 1, end)?;
        on_frame(index, header, signals)?;
        index = end + 1;
    }
}

/// `signal_name, offset;` lines between `start` and the frame's close.
fn frame_signals(scanner: &Scanner<'_>, start: usize, end: usize) -> Result<SectionMap<String>> {
    let mut signals = SectionMap::new();
    for index in start..end {
        let cleaned = tokens::strip_unwanted(&scanner.line(index).text);
        let fields: Vec<&str> = cleaned.split(',').collect();
        match fields.as_slice() {
            [name, offset] if !name.is_empty() && !offset.is_empty() => {
                insert(
                    &mut signals,
                    name.to_string(),
                    offset.to_string(),
                    scanner,
                    index,
                    "frame signal",
                )?;
            }
            _ => return Err(scanner.tokenization(index, "expected `signal_name, offset`")),
        }
    }
    Ok(signals)
}

fn frame_id(scanner: &Scanner<'_>, index: usize, text: &str) -> Result<u8> {
    tokens::integer(text)
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| scanner.tokenization(index, "frame identifier is not a number"))
}

/// `name: id, publisher, response_length { signal, offset; ... }`
pub(super) fn extract_frames(scanner: &Scanner<'_>, open: usize, doc: &mut Document) -> Result<usize> {
    let close = walk_frames(
        scanner,
        open,
        4,
        "expected `name: id, publisher, length {`",
        |index, header, signals| {
            let frame = Frame {
                identifier: frame_id(scanner, index, &header[1])?,
                publisher: header[2].clone(),
                response_length: tokens::integer(&header[3])
                    .and_then(|v| u8::try_from(v).ok())
                    .ok_or_else(|| scanner.tokenization(index, "response length is not a number"))?,
                signals,
            };
            insert(&mut doc.frames, header[0].clone(), frame, scanner, index, "Frames")
        },
    )?;
    debug!(count = doc.frames.len(), "parsed Frames");
    Ok(close)
}

/// `name: id { signal, offset; ... }`
pub(super) fn extract_diagnostic_frames(
    scanner: &Scanner<'_>,
    open: usize,
    doc: &mut Document,
) -> Result<usize> {
    let close = walk_frames(
        scanner,
        open,
        2,
        "expected `name: id {`",
        |index, header, signals| {
            let frame = DiagnosticFrame {
                identifier: frame_id(scanner, index, &header[1])?,
                signals,
            };
            insert(
                &mut doc.diagnostic_frames,
                header[0].clone(),
                frame,
                scanner,
                index,
                "Diagnostic_frames",
            )
        },
    )?;
    debug!(count = doc.diagnostic_frames.len(), "parsed Diagnostic_frames");
    Ok(close)
}

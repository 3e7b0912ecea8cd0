use tracing::{debug, trace};

use super::insert;
use crate::{
    Document, Result, SectionMap,
    parsing::{LineKind, Scanner, tokens},
    types::NodeAttribute,
};

/// Sub-block names that list a node's frames and their message ids.
const FRAME_BLOCKS: [&str; 2] = ["configurable_frames", "configure_frames"];

/// Node blocks of `key = value;` lines with a `configurable_frames` sub-block.
pub(super) fn extract(scanner: &Scanner<'_>, open: usize, doc: &mut Document) -> Result<usize> {
    let mut index = open + 1;
    loop {
        match scanner.kind(index) {
            None | Some(LineKind::BlockStart) => return Err(scanner.unterminated(open)),
            Some(LineKind::BlockClose) => break,
            Some(LineKind::Content) => {
                return Err(scanner.tokenization(index, "expected `node_name {`"));
            }
            Some(_) => {}
        }
        let name = tokens::strip_unwanted(&scanner.line(index).text);
        let (attribute, close) = node_attribute(scanner, index)?;
        insert(&mut doc.node_attributes, name, attribute, scanner, index, "Node_attributes")?;
        index = close + 1;
    }
    debug!(count = doc.node_attributes.len(), "parsed Node_attributes");
    Ok(index)
}

/// Parse one node block opened at `open`; returns the record and the index of
/// the node's closing brace.
fn node_attribute(scanner: &Scanner<'_>, open: usize) -> Result<(NodeAttribute, usize)> {
    let mut attribute = NodeAttribute::default();
    let mut index = open + 1;
    loop {
        let kind = scanner
            .kind(index)
            .filter(|&k| k != LineKind::BlockStart)
            .ok_or_else(|| scanner.unterminated(open))?;
        match kind {
            LineKind::BlockClose => return Ok((attribute, index)),
            LineKind::Content => {
                assign(&mut attribute, scanner, index)?;
                index += 1;
            }
            _ => {
                let block = tokens::strip_unwanted(&scanner.line(index).text);
                let close = scanner.next_close(index)?;
                if FRAME_BLOCKS.contains(&block.as_str()) {
                    configurable_frames(scanner, index + 1, close, &mut attribute.configurable_frames)?;
                } else {
                    trace!(block = %block, "skipping node attribute block");
                }
                index = close + 1;
            }
        }
    }
}

fn assign(attribute: &mut NodeAttribute, scanner: &Scanner<'_>, index: usize) -> Result<()> {
    let cleaned = tokens::strip_unwanted(&scanner.line(index).text);
    let Some((key, value)) = cleaned.split_once('=') else {
        return Err(scanner.tokenization(index, "expected `key = value`"));
    };
    let millis = || {
        tokens::digits(value)
            .ok_or_else(|| scanner.tokenization(index, format!("{key} has no digits")))
    };
    match key {
        "LIN_protocol" => attribute.lin_protocol = value.to_string(),
        "configured_NAD" => attribute.configured_nad = value.to_string(),
        "initial_NAD" => attribute.initial_nad = Some(value.to_string()),
        "product_id" => {
            attribute.product_id = value
                .split(',')
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect();
        }
        "response_error" => attribute.response_error = value.to_string(),
        "P2_min" => attribute.p2_min_ms = Some(millis()?),
        "ST_min" => attribute.st_min_ms = Some(millis()?),
        _ => attribute.extra.push((key.to_string(), value.to_string())),
    }
    Ok(())
}

/// `frame = id;` or, for LIN 2.1, a bare `frame;`.
fn configurable_frames(
    scanner: &Scanner<'_>,
    start: usize,
    end: usize,
    frames: &mut SectionMap<Option<String>>,
) -> Result<()> {
    for index in start..end {
        let cleaned = tokens::strip_unwanted(&scanner.line(index).text);
        let (name, id) = match cleaned.split_once('=') {
            Some((name, id)) => (name.to_string(), Some(id.to_string())),
            None => (cleaned.clone(), None),
        };
        if name.is_empty() {
            return Err(scanner.tokenization(index, "expected `frame = id`"));
        }
        insert(frames, name, id, scanner, index, "configurable_frames")?;
    }
    Ok(())
}

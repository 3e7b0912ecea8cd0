use tracing::debug;

use super::{insert, nested_section_close};
use crate::{
    Document, Result,
    parsing::{LineKind, Scanner, tokens},
    types::SignalEncodingType,
};

/// Named blocks of comma-separated value rows.
pub(super) fn extract_encoding_types(
    scanner: &Scanner<'_>,
    open: usize,
    doc: &mut Document,
) -> Result<usize> {
    let close = nested_section_close(scanner, open)?;
    let mut index = open + 1;
    while index < close {
        if !scanner.kind(index).is_some_and(LineKind::opens_entry) {
            return Err(scanner.tokenization(index, "expected `encoding_name {`"));
        }
        let name = tokens::strip_unwanted(&scanner.line(index).text);
        let end = scanner.next_close(index)?;
        let rows = (index + 1..end)
            .map(|i| {
                scanner
                    .line(i)
                    .text
                    .split(',')
                    .map(tokens::encoding_token)
                    .collect()
            })
            .collect();
        insert(
            &mut doc.signal_encoding_types,
            name,
            SignalEncodingType { rows },
            scanner,
            index,
            "Signal_encoding_types",
        )?;
        index = end + 1;
    }
    debug!(count = doc.signal_encoding_types.len(), "parsed Signal_encoding_types");
    Ok(close)
}

/// `name: name1, name2, ...;`
pub(super) fn extract_representation(
    scanner: &Scanner<'_>,
    open: usize,
    doc: &mut Document,
) -> Result<usize> {
    let close = scanner.next_close(open)?;
    for index in open + 1..close {
        let cleaned = tokens::strip_unwanted(&scanner.line(index).text);
        let Some((key, values)) = cleaned.split_once(':') else {
            return Err(scanner.tokenization(index, "expected `name: name, ...`"));
        };
        let values = values
            .split(',')
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();
        insert(
            &mut doc.signal_representation,
            key.to_string(),
            values,
            scanner,
            index,
            "Signal_representation",
        )?;
    }
    debug!(count = doc.signal_representation.len(), "parsed Signal_representation");
    Ok(close)
}

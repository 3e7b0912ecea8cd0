use tracing::debug;

use super::insert;
use crate::{
    Document, Result,
    parsing::{Scanner, tokens},
    types::{DiagnosticSignal, InitValue, Signal},
};

/// A signal line split into its name and top-level fields.
struct SignalLine {
    name: String,
    size: String,
    init: InitValue,
    rest: Vec<String>,
}

/// Split `name: size, init, ...` like [`tokens::split_fields`], but keep a
/// braced initial value such as `{0, 0xFF}` together.
fn split_signal_line(text: &str) -> Option<SignalLine> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ';' | '"'))
        .collect();
    let (name, rest) = cleaned.split_once(':')?;

    let mut fields = Vec::new();
    let mut field = String::new();
    let mut depth = 0usize;
    for c in rest.chars() {
        match c {
            '{' => {
                depth += 1;
                field.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                field.push(c);
            }
            ',' if depth == 0 => fields.push(core::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    let mut fields = fields.into_iter().filter(|f| !f.is_empty());
    let size = tokens::strip_unwanted(&fields.next()?);
    let raw_init = fields.next()?;
    let init = if raw_init.starts_with('{') && raw_init.ends_with('}') {
        InitValue::Array(
            raw_init
                .trim_matches(|c| c == '{' || c == '}')
                .split(',')
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect(),
        )
    } else {
        InitValue::Scalar(tokens::strip_unwanted(&raw_init))
    };
    let rest = fields
        .map(|f| tokens::strip_unwanted(&f))
        .filter(|f| !f.is_empty())
        .collect();

    Some(SignalLine {
        name: tokens::strip_unwanted(name),
        size,
        init,
        rest,
    })
}

fn signal_size(scanner: &Scanner<'_>, index: usize, size: &str) -> Result<u16> {
    tokens::integer(size)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| scanner.tokenization(index, "signal size is not a number"))
}

/// `name: size, init, publisher, subscriber[, subscriber...];`
pub(super) fn extract_signals(scanner: &Scanner<'_>, open: usize, doc: &mut Document) -> Result<usize> {
    let close = scanner.next_close(open)?;
    for index in open + 1..close {
        let line = split_signal_line(&scanner.line(index).text).ok_or_else(|| {
            scanner.tokenization(index, "expected `name: size, init, publisher, subscribers`")
        })?;
        let mut rest = line.rest.into_iter();
        let publisher = rest
            .next()
            .ok_or_else(|| scanner.tokenization(index, "signal has no publisher"))?;
        let signal = Signal {
            size: signal_size(scanner, index, &line.size)?,
            init: line.init,
            publisher,
            subscribers: rest.collect(),
        };
        insert(&mut doc.signals, line.name, signal, scanner, index, "Signals")?;
    }
    debug!(count = doc.signals.len(), "parsed Signals");
    Ok(close)
}

/// `name: size, init;`
pub(super) fn extract_diagnostic_signals(
    scanner: &Scanner<'_>,
    open: usize,
    doc: &mut Document,
) -> Result<usize> {
    let close = scanner.next_close(open)?;
    for index in open + 1..close {
        let line = split_signal_line(&scanner.line(index).text)
            .ok_or_else(|| scanner.tokenization(index, "expected `name: size, init`"))?;
        let signal = DiagnosticSignal {
            size: signal_size(scanner, index, &line.size)?,
            init: line.init,
        };
        insert(
            &mut doc.diagnostic_signals,
            line.name,
            signal,
            scanner,
            index,
            "Diagnostic_signals",
        )?;
    }
    debug!(count = doc.diagnostic_signals.len(), "parsed Diagnostic_signals");
    Ok(close)
}

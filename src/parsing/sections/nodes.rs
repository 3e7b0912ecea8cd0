use tracing::{debug, trace};

use crate::{
    Document, Result,
    parsing::{Scanner, tokens},
    types::NodeSection,
};

/// `Master: name, timer_base, jitter;` and `Slaves: name, ...;`
pub(super) fn extract(scanner: &Scanner<'_>, open: usize, doc: &mut Document) -> Result<usize> {
    let close = scanner.next_close(open)?;
    if doc.nodes.is_some() {
        return Err(scanner.duplicate(open, "Nodes", "Nodes"));
    }

    let mut nodes = NodeSection::default();
    for index in open + 1..close {
        let cleaned = tokens::strip_unwanted(&scanner.line(index).text);
        let Some((key, value)) = cleaned.split_once(':') else {
            return Err(scanner.tokenization(index, "expected `Master:` or `Slaves:`"));
        };
        match key {
            "Master" => {
                let fields: Vec<&str> = value.split(',').collect();
                if fields.len() < 3 {
                    return Err(scanner.tokenization(
                        index,
                        "expected `Master: name, timer_base, jitter`",
                    ));
                }
                nodes.master = fields[0].to_string();
                nodes.timer_base_ms = tokens::decimal(fields[1])
                    .ok_or_else(|| scanner.tokenization(index, "timer base has no digits"))?;
                nodes.jitter_ms = tokens::decimal(fields[2])
                    .ok_or_else(|| scanner.tokenization(index, "jitter has no digits"))?;
            }
            "Slaves" => {
                nodes.slaves = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            other => trace!(key = other, "ignoring Nodes entry"),
        }
    }

    debug!(master = %nodes.master, slaves = nodes.slaves.len(), "parsed Nodes");
    doc.nodes = Some(nodes);
    Ok(close)
}

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Line, tokens};
use crate::types::Header;

static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)\s*=\s*(.*?)\s*;?$").unwrap());

/// Record a top-level `key = value;` line in `header` if the key is known.
pub(crate) fn assign_header(header: &mut Header, line: &Line) {
    let Some(caps) = ASSIGNMENT.captures(&line.text) else {
        return;
    };
    let value = caps[2].trim().trim_matches('"').to_string();
    match &caps[1] {
        "LIN_protocol_version" => header.protocol_version = Some(value),
        "LIN_language_version" => header.language_version = Some(value),
        "LIN_speed" => header.speed_kbps = tokens::decimal(&value),
        "Channel_name" => header.channel_name = Some(value),
        other => tracing::trace!(key = other, line = line.number, "ignoring header assignment"),
    }
}

//! Tokenization helpers shared by the section extractors.

/// Remove whitespace, `;`, `{`, `}` and `"` from `text`.
pub fn strip_unwanted(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ';' | '{' | '}' | '"'))
        .collect()
}

/// Split a `name: a, b, c` line into `[name, a, b, c]` after cleanup.
///
/// Returns `None` if the line has no `:`. Empty fields are dropped.
pub fn split_fields(text: &str) -> Option<Vec<String>> {
    let cleaned = strip_unwanted(text);
    let (name, rest) = cleaned.split_once(':')?;
    let mut fields = vec![name.to_string()];
    fields.extend(rest.split(',').filter(|f| !f.is_empty()).map(String::from));
    Some(fields)
}

/// Integer made of every ASCII digit in `text`, ignoring everything else.
///
/// `"50 ms"` gives 50. Returns `None` when `text` holds no digit.
pub fn digits(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Floating-point number made of the digits and dots in `text`.
///
/// `"0.1 ms"` gives 0.1. Returns `None` without a digit or when the leftover
/// is not a valid number.
pub fn decimal(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    kept.parse().ok()
}

/// Decimal or `0x`-prefixed hexadecimal integer.
pub fn integer(text: &str) -> Option<u32> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// A comma-separated token of an encoding row: trimmed, without `"` or `;`.
pub fn encoding_token(text: &str) -> String {
    let kept: String = text.chars().filter(|c| !matches!(c, '"' | ';')).collect();
    kept.trim().to_string()
}

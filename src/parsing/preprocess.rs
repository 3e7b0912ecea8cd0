use crate::{Error, Result, parser::ParseOptions};

/// A non-blank source line and its 1-based position in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

/// Turn raw physical lines into the line sequence the scanner works on.
///
/// Trailing whitespace is removed, blank lines are dropped and, when enabled,
/// `//` comments outside double quotes are cut off. The comment header is
/// then skipped by counting the lines that contain `/*` and dropping that many
/// lines from the start. The count covers the whole file, so a second comment
/// block further down makes the skip too long.
pub(crate) fn preprocess<I, S>(raw: I, options: &ParseOptions) -> Result<Vec<Line>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lines = Vec::new();

    for (i, raw_line) in raw.into_iter().enumerate() {
        let number = i + 1;
        let mut text = raw_line.as_ref();

        if let Some(c) = text
            .chars()
            .find(|c| c.is_ascii_control() && !c.is_ascii_whitespace())
        {
            return Err(Error::Format {
                line: number,
                reason: format!("control character {:?} in text", c),
            });
        }

        if options.strip_line_comments {
            if let Some(pos) = line_comment_start(text) {
                text = &text[..pos];
            }
        }

        let text = text.trim_end();
        if text.trim_start().is_empty() {
            continue;
        }

        lines.push(Line {
            number,
            text: text.to_string(),
        });
    }

    if options.skip_comment_header {
        let header_len = lines.iter().filter(|l| l.text.contains("/*")).count();
        if header_len != 0 {
            tracing::debug!(lines = header_len, "skipping comment header");
            lines.drain(..header_len.min(lines.len()));
        }
    }

    Ok(lines)
}

/// Byte offset of the first `//` outside double quotes.
fn line_comment_start(text: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut chars = text.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            '/' if !in_quotes && chars.peek().is_some_and(|&(_, next)| next == '/') => {
                return Some(pos);
            }
            _ => {}
        }
    }
    None
}

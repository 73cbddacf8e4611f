//! C array initialiser text, e.g.
//! `const uint16_t tune[] PROGMEM = { 0x0818, 0xF000 };`

use crate::FormatError;

/// Parse the first `{ ... }` array in `source` into words.
///
/// Elements are hex (`0x`) or decimal with an optional `u` suffix. `//` and
/// `/* */` comments are ignored anywhere in the text. A trailing comma is
/// allowed.
pub fn load_text(source: &str) -> Result<Vec<u16>, FormatError> {
    let clean = strip_comments(source);
    let open = clean.find('{').ok_or(FormatError::MissingArray)?;
    let close = clean[open..]
        .find('}')
        .map(|i| open + i)
        .ok_or(FormatError::MissingArray)?;

    let body = &clean[open + 1..close];
    let mut tokens: Vec<&str> = body.split(',').map(str::trim).collect();
    // A trailing comma, or an empty array, leaves one empty token at the end
    if tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    let mut words = Vec::with_capacity(tokens.len());
    for (index, token) in tokens.into_iter().enumerate() {
        let value = parse_number(token).ok_or(FormatError::InvalidNumber { index })?;
        let word = u16::try_from(value).map_err(|_| FormatError::WordOutOfRange { index })?;
        words.push(word);
    }
    log::debug!("Parsed {} words from text", words.len());
    Ok(words)
}

fn parse_number(token: &str) -> Option<u32> {
    let token = token.trim_end_matches(['u', 'U']);
    match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => token.parse().ok(),
    }
}

/// Replace comments with a space so tokens either side stay separate.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.find('\n').map_or("", |i| &after[i..]);
            out.push(' ');
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |i| &after[i + 2..]);
            out.push(' ');
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                out.push(c);
            }
            rest = chars.as_str();
        }
    }
    out
}

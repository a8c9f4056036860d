use crate::TtlParseError;

/// Parses an integer literal, inferring the base from its prefix.
///
/// Accepts an optional sign followed by `0x`/`0X` (hex), `0o`/`0O` (octal),
/// `0b`/`0B` (binary), a bare leading `0` (octal), or plain decimal digits.
///
/// # Errors
/// - `TtlParseError` if the input isn't a literal of that form or overflows an i64.
pub(crate) fn parse_int_literal(literal: &str) -> Result<i64, TtlParseError> {
    let invalid = || TtlParseError(literal.to_string());

    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        Some("0o" | "0O") => (8, &unsigned[2..]),
        Some("0b" | "0B") => (2, &unsigned[2..]),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, &unsigned[1..]),
        _ => (10, unsigned),
    };

    // from_str_radix accepts its own sign, which would let "--1" through.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(invalid());
    }

    let signed = if negative {
        format!("-{digits}")
    } else {
        digits.to_string()
    };
    i64::from_str_radix(&signed, radix).map_err(|_| invalid())
}

/// Longest log line body before it's cut short.
const LOG_LIMIT: usize = 256;

/// Shortens a response body for logging, keeping the first [LOG_LIMIT] bytes
/// and noting the full length.
pub(crate) fn truncate_for_log(text: &str) -> String {
    if text.len() <= LOG_LIMIT {
        return text.to_string();
    }

    let end = (0..=LOG_LIMIT)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &text[..end], text.len())
}

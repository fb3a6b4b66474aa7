//! Quote repairs: smart-quote normalization, single-quoted strings, and
//! the internal-quote escaping heuristic.

use crate::repair::{Repair, RepairKind};
use crate::scan::{BracketStack, next_non_ws, take_ident};

/// Curly, angle, prime, low-9, grave and acute variants mapped to ASCII.
const SMART_QUOTES: [(char, char); 18] = [
    ('\u{201C}', '"'),  // left double quotation mark
    ('\u{201D}', '"'),  // right double quotation mark
    ('\u{201E}', '"'),  // double low-9 quotation mark
    ('\u{201F}', '"'),  // double high-reversed-9 quotation mark
    ('\u{00AB}', '"'),  // left-pointing double angle
    ('\u{00BB}', '"'),  // right-pointing double angle
    ('\u{2033}', '"'),  // double prime
    ('\u{301D}', '"'),  // reversed double prime quotation mark
    ('\u{301E}', '"'),  // double prime quotation mark
    ('\u{2018}', '\''), // left single quotation mark
    ('\u{2019}', '\''), // right single quotation mark
    ('\u{201A}', '\''), // single low-9 quotation mark
    ('\u{201B}', '\''), // single high-reversed-9 quotation mark
    ('\u{2039}', '\''), // single left-pointing angle
    ('\u{203A}', '\''), // single right-pointing angle
    ('\u{2032}', '\''), // prime
    ('\u{0060}', '\''), // grave accent
    ('\u{00B4}', '\''), // acute accent
];

fn smart_replacement(c: char) -> Option<char> {
    SMART_QUOTES.iter().find(|(s, _)| *s == c).map(|&(_, r)| r)
}

/// Replace every smart-quote variant with its ASCII equivalent.
///
/// Content-blind on purpose: a smart quote inside a JSON string is still
/// invalid and must be normalized, so this runs over the whole text.
pub(crate) fn normalize_smart_quotes(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match smart_replacement(c) {
            Some(r) => {
                log.push(Repair::new(
                    RepairKind::SmartQuote,
                    text,
                    i,
                    c.encode_utf8(&mut [0u8; 4]),
                    r.encode_utf8(&mut [0u8; 4]),
                ));
                out.push(r);
            }
            None => out.push(c),
        }
    }
    out
}

/// Rewrite `'...'` string literals as `"..."`.
///
/// `\'` becomes a literal `'`, an unescaped `"` inside becomes `\"`, and
/// other escapes pass through. An opening `'` with no closing partner is
/// left untouched.
pub(crate) fn convert_single_quote_strings(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_double = false;
    let mut escape_next = false;
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if escape_next {
            out.push(c);
            escape_next = false;
            i += l;
            continue;
        }
        if c == '\\' {
            out.push(c);
            escape_next = true;
            i += l;
            continue;
        }
        if c == '"' {
            in_double = !in_double;
            out.push(c);
            i += l;
            continue;
        }
        if c == '\'' && !in_double {
            match scan_single_quoted(text, i) {
                Some((end, content)) => {
                    let original = &text[i..end];
                    let replacement = format!("\"{}\"", content);
                    log.push(Repair::new(
                        RepairKind::SingleQuoteString,
                        text,
                        i,
                        original,
                        &replacement,
                    ));
                    out.push_str(&replacement);
                    i = end;
                }
                None => {
                    out.push(c);
                    i += l;
                }
            }
            continue;
        }
        out.push(c);
        i += l;
    }
    out
}

/// Scan a single-quoted literal opening at `start`; returns the byte offset
/// just past the closing `'` and the rewritten double-quote-safe content.
fn scan_single_quoted(text: &str, start: usize) -> Option<(usize, String)> {
    let mut content = String::new();
    let mut esc = false;
    let mut j = start + 1;
    while j < text.len() {
        let c = text[j..].chars().next().unwrap();
        let l = c.len_utf8();
        if esc {
            match c {
                '\'' => content.push('\''),
                '"' => content.push_str("\\\""),
                _ => {
                    content.push('\\');
                    content.push(c);
                }
            }
            esc = false;
            j += l;
            continue;
        }
        match c {
            '\\' => esc = true,
            '\'' => return Some((j + 1, content)),
            '"' => content.push_str("\\\""),
            _ => content.push(c),
        }
        j += l;
    }
    None
}

/// Escape `"` characters that sit *inside* a string but do not close it.
///
/// The classifier looks at the token following the quote; see the decision
/// table in the crate docs. It deliberately trades recall for precision:
/// more than three alphabetic characters between an ambiguous quote and the
/// next one reads as prose, so the quote is treated as internal.
pub(crate) fn fix_unescaped_quotes(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut brackets = BracketStack::new();
    let mut in_string = false;
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if !in_string {
            match c {
                '"' => {
                    in_string = true;
                    out.push('"');
                }
                '{' | '[' | '}' | ']' => {
                    brackets.observe(c);
                    out.push(c);
                }
                _ => out.push(c),
            }
            i += l;
            continue;
        }
        // Inside a string.
        if c == '\\' {
            out.push('\\');
            i += l;
            if i < text.len() {
                let n = text[i..].chars().next().unwrap();
                out.push(n);
                i += n.len_utf8();
            }
            continue;
        }
        if c == '"' {
            if quote_closes_string(text, i, &brackets) {
                in_string = false;
                out.push('"');
            } else {
                out.push_str("\\\"");
                log.push(Repair::new(RepairKind::UnescapedQuote, text, i, "\"", "\\\""));
            }
            i += l;
            continue;
        }
        out.push(c);
        i += l;
    }
    out
}

fn is_keyword_at(text: &str, at: usize) -> bool {
    matches!(take_ident(text, at), "true" | "false" | "null")
}

/// Decide whether the `"` at byte offset `qi` closes the current string.
fn quote_closes_string(text: &str, qi: usize, brackets: &BracketStack) -> bool {
    let Some((ni, c)) = next_non_ws(text, qi + 1) else {
        return true; // end of input closes the string
    };
    match c {
        ']' | '}' => true,
        ':' => true, // end of a key
        ',' => closes_before_comma(text, qi, ni),
        '"' => closes_before_quote(text, qi, ni, brackets),
        '{' | '[' | '-' => !brackets.is_empty(),
        d if d.is_ascii_digit() => !brackets.is_empty(),
        _ if is_keyword_at(text, ni) => !brackets.is_empty(),
        _ => false,
    }
}

/// The quote is followed by a comma: closing if the comma introduces a
/// well-formed continuation, otherwise prose length decides.
fn closes_before_comma(text: &str, qi: usize, comma: usize) -> bool {
    match next_non_ws(text, comma + 1) {
        None => true,
        Some((di, d)) => match d {
            '{' | '[' | '-' => true,
            d if d.is_ascii_digit() => true,
            _ if is_keyword_at(text, di) => true,
            '"' => {
                // A quoted key (string followed by a colon) is the usual
                // object continuation.
                if let Some(close) = find_string_close(text, di) {
                    if matches!(next_non_ws(text, close + 1), Some((_, ':'))) {
                        return true;
                    }
                }
                alphabetic_run_is_short(text, qi)
            }
            _ => alphabetic_run_is_short(text, qi),
        },
    }
}

/// The quote is directly followed by another quote: peek past that string.
fn closes_before_quote(text: &str, qi: usize, next_quote: usize, brackets: &BracketStack) -> bool {
    let bytes = text.as_bytes();
    // `"` directly followed by `""` reads as internal empty quotes.
    if next_quote == qi + 1 && bytes.get(qi + 2) == Some(&b'"') {
        return false;
    }
    let Some(close) = find_string_close(text, next_quote) else {
        return false;
    };
    match next_non_ws(text, close + 1) {
        None => true,
        Some((_, ':')) => true,
        Some((_, ',')) | Some((_, '}')) | Some((_, ']')) => true,
        Some((_, '"')) if brackets.in_array() => true,
        _ => false,
    }
}

/// Byte offset of the unescaped `"` terminating the string that opens at
/// `open` (which must point at a `"`).
fn find_string_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut j = open + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return Some(j),
            _ => j += 1,
        }
    }
    None
}

/// Fewer than four alphabetic characters between the ambiguous quote and
/// the next `"` reads as structure, more reads as prose.
fn alphabetic_run_is_short(text: &str, qi: usize) -> bool {
    let mut count = 0usize;
    for c in text[qi + 1..].chars() {
        if c == '"' {
            break;
        }
        if c.is_alphabetic() {
            count += 1;
            if count > 3 {
                return false;
            }
        }
    }
    count <= 3
}

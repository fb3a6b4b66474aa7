//! Structural repairs: truncation markers, missing colons and commas,
//! unclosed brackets, and stray commas.

use crate::repair::{Repair, RepairKind};
use crate::scan::{
    BracketStack, CharContext, StringState, is_ws, last_significant, next_non_ws, take_ident,
};

/// Drop `...` / `…` used as a truncation marker, together with a comma
/// that precedes it and whitespace that follows it.
pub(crate) fn remove_ellipsis_markers(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if st.step(c) != CharContext::Outside {
            out.push(c);
            i += l;
            continue;
        }
        let marker_len = if text[i..].starts_with("...") {
            Some(3)
        } else if c == '…' {
            Some('…'.len_utf8())
        } else {
            None
        };
        if let Some(ml) = marker_len {
            let marker = &text[i..i + ml];
            let trimmed = out.trim_end_matches(is_ws).len();
            let original = if out[..trimmed].ends_with(',') {
                // The marker was the final element: its leading comma goes too.
                out.truncate(trimmed - 1);
                format!(", {}", marker)
            } else {
                marker.to_string()
            };
            log.push(Repair::new(
                RepairKind::TruncationMarker,
                text,
                i,
                &original,
                "",
            ));
            i += ml;
            while i < text.len() && is_ws(text.as_bytes()[i] as char) {
                i += 1;
            }
            continue;
        }
        out.push(c);
        i += l;
    }
    out
}

fn is_value_start_at(text: &str, at: usize) -> bool {
    let Some(c) = text[at..].chars().next() else {
        return false;
    };
    match c {
        '"' | '{' | '[' | '-' => true,
        d if d.is_ascii_digit() => true,
        _ => matches!(take_ident(text, at), "true" | "false" | "null"),
    }
}

/// Insert `:` between a key string and its value.
///
/// A string is a key when its opening `"` follows `{` or `,`; in object
/// context a string that follows a completed value and is itself followed
/// by a value start is another key whose colon went missing.
pub(crate) fn fix_missing_colons(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut brackets = BracketStack::new();
    let mut in_string = false;
    let mut escape_next = false;
    let mut open_out_idx = 0usize;
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if in_string {
            if escape_next {
                out.push(c);
                escape_next = false;
                i += l;
                continue;
            }
            match c {
                '\\' => {
                    escape_next = true;
                    out.push(c);
                }
                '"' => {
                    in_string = false;
                    out.push(c);
                    if let Some((ni, _)) = next_non_ws(text, i + 1) {
                        if is_value_start_at(text, ni) && string_was_key(&out, open_out_idx, &brackets)
                        {
                            out.push(':');
                            log.push(Repair::new(RepairKind::MissingColon, text, i + 1, "", ":"));
                        }
                    }
                }
                _ => out.push(c),
            }
            i += l;
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                open_out_idx = out.len();
                out.push(c);
            }
            '{' | '[' | '}' | ']' => {
                brackets.observe(c);
                out.push(c);
            }
            _ => out.push(c),
        }
        i += l;
    }
    out
}

fn string_was_key(out: &str, open_out_idx: usize, brackets: &BracketStack) -> bool {
    let prev = last_significant(&out[..open_out_idx]);
    match prev {
        Some('{') | Some(',') => true,
        Some('}') | Some(']') => brackets.in_object(),
        Some(p) if p.is_ascii_digit() || p.is_ascii_alphabetic() => brackets.in_object(),
        _ => false,
    }
}

/// Insert `,` between two adjacent values inside an object or array.
pub(crate) fn fix_missing_commas(text: &str, log: &mut Vec<Repair>) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 8);
    let mut brackets = BracketStack::new();
    let mut just_saw_value = false;
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        match c {
            '"' => {
                if just_saw_value && !brackets.is_empty() {
                    out.push(',');
                    log.push(Repair::new(RepairKind::MissingComma, text, i, "", ","));
                }
                // Copy the whole string literal.
                out.push('"');
                i += 1;
                let mut esc = false;
                let mut closed = false;
                while i < text.len() {
                    let s = text[i..].chars().next().unwrap();
                    let sl = s.len_utf8();
                    out.push(s);
                    i += sl;
                    if esc {
                        esc = false;
                    } else if s == '\\' {
                        esc = true;
                    } else if s == '"' {
                        closed = true;
                        break;
                    }
                }
                just_saw_value = closed;
            }
            '{' | '[' => {
                if just_saw_value && !brackets.is_empty() {
                    out.push(',');
                    log.push(Repair::new(RepairKind::MissingComma, text, i, "", ","));
                }
                brackets.observe(c);
                out.push(c);
                just_saw_value = false;
                i += 1;
            }
            '}' | ']' => {
                brackets.observe(c);
                out.push(c);
                just_saw_value = true;
                i += 1;
            }
            ':' | ',' => {
                out.push(c);
                just_saw_value = false;
                i += 1;
            }
            '-' => {
                if just_saw_value && !brackets.is_empty() {
                    out.push(',');
                    log.push(Repair::new(RepairKind::MissingComma, text, i, "", ","));
                }
                let end = number_token_end(bytes, i);
                out.push_str(&text[i..end]);
                just_saw_value = true;
                i = end;
            }
            d if d.is_ascii_digit() => {
                if just_saw_value && !brackets.is_empty() {
                    out.push(',');
                    log.push(Repair::new(RepairKind::MissingComma, text, i, "", ","));
                }
                let end = number_token_end(bytes, i);
                out.push_str(&text[i..end]);
                just_saw_value = true;
                i = end;
            }
            a if a.is_ascii_alphabetic() => {
                let ident = take_ident(text, i);
                let keyword = matches!(ident, "true" | "false" | "null");
                if keyword && just_saw_value && !brackets.is_empty() {
                    out.push(',');
                    log.push(Repair::new(RepairKind::MissingComma, text, i, "", ","));
                }
                out.push_str(ident);
                just_saw_value = keyword;
                i += ident.len();
            }
            w if is_ws(w) => {
                out.push(w);
                i += l;
            }
            _ => {
                out.push(c);
                just_saw_value = false;
                i += l;
            }
        }
    }
    out
}

/// Consume a number token: sign, digits, dot, exponent (with its sign).
fn number_token_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' | b'.' => i += 1,
            b'e' | b'E' => {
                i += 1;
                if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
                    i += 1;
                }
            }
            _ => break,
        }
    }
    i
}

/// Append the closer for every unmatched `{` / `[` at end of input.
pub(crate) fn auto_close_brackets(text: &str, log: &mut Vec<Repair>) -> String {
    let mut st = StringState::default();
    let mut brackets = BracketStack::new();
    for c in text.chars() {
        if st.step(c) == CharContext::Outside {
            brackets.observe(c);
        }
    }
    if brackets.is_empty() {
        return text.to_string();
    }
    let mut out = text.to_string();
    for closer in brackets.closers() {
        log.push(Repair::new(
            RepairKind::MissingBracket,
            text,
            text.len(),
            "",
            closer.encode_utf8(&mut [0u8; 4]),
        ));
        out.push(closer);
    }
    out
}

/// Delete a `,` whose next significant character is `]` or `}`.
pub(crate) fn remove_trailing_commas(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if st.step(c) == CharContext::Outside && c == ',' {
            if let Some((_, n)) = next_non_ws(text, i + 1) {
                if n == ']' || n == '}' {
                    log.push(Repair::new(RepairKind::TrailingComma, text, i, ",", ""));
                    i += 1;
                    continue;
                }
            }
        }
        out.push(c);
        i += l;
    }
    out
}

/// Delete a `,` that immediately follows another `,` or opens a container
/// (a leading comma).
pub(crate) fn remove_double_commas(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if st.step(c) == CharContext::Outside
            && c == ','
            && matches!(last_significant(&out), Some(',') | Some('{') | Some('['))
        {
            log.push(Repair::new(RepairKind::DoubleComma, text, i, ",", ""));
            i += 1;
            continue;
        }
        out.push(c);
        i += l;
    }
    out
}

//! Literal rewrites outside strings: Python keywords, JavaScript values,
//! and non-decimal number formats.

use crate::repair::{Repair, RepairKind};
use crate::scan::{CharContext, StringState};

const PYTHON_LITERALS: [(&str, &str); 3] =
    [("True", "true"), ("False", "false"), ("None", "null")];

fn boundary_ok(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let after = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
    before && after
}

/// `True` / `False` / `None` → `true` / `false` / `null`, with a
/// character-boundary check on both sides.
pub(crate) fn convert_python_literals(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    let mut i = 0usize;
    'outer: while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if st.step(c) != CharContext::Outside {
            out.push(c);
            i += l;
            continue;
        }
        for (py, json) in PYTHON_LITERALS {
            if text[i..].starts_with(py) && boundary_ok(text, i, i + py.len()) {
                log.push(Repair::new(RepairKind::PythonLiteral, text, i, py, json));
                out.push_str(json);
                i += py.len();
                continue 'outer;
            }
        }
        out.push(c);
        i += l;
    }
    out
}

const JS_VALUES: [&str; 3] = ["NaN", "Infinity", "undefined"];

/// `NaN`, `Infinity`, `+Infinity`, `-Infinity`, `undefined` → `null`.
pub(crate) fn convert_javascript_values(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    let mut i = 0usize;
    'outer: while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if st.step(c) != CharContext::Outside {
            out.push(c);
            i += l;
            continue;
        }
        // Signed Infinity consumes the sign as part of the token.
        if (c == '+' || c == '-')
            && text[i + 1..].starts_with("Infinity")
            && boundary_ok(text, i, i + 1 + "Infinity".len())
        {
            let token = &text[i..i + 1 + "Infinity".len()];
            log.push(Repair::new(RepairKind::JavascriptValue, text, i, token, "null"));
            out.push_str("null");
            i += token.len();
            continue;
        }
        for tok in JS_VALUES {
            if text[i..].starts_with(tok) && boundary_ok(text, i, i + tok.len()) {
                log.push(Repair::new(RepairKind::JavascriptValue, text, i, tok, "null"));
                out.push_str("null");
                i += tok.len();
                continue 'outer;
            }
        }
        out.push(c);
        i += l;
    }
    out
}

/// `0xFF` / `0o777` / `0b1010` (optionally signed) → decimal text.
///
/// Tokens whose value does not fit in a `u128` are left untouched.
pub(crate) fn convert_number_formats(text: &str, log: &mut Vec<Repair>) -> String {
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
        if matches!(c, '+' | '-' | '0') {
            if let Some((token, value, negative)) = match_radix_literal(text, i) {
                let replacement = if negative {
                    format!("-{}", value)
                } else {
                    value.to_string()
                };
                log.push(Repair::new(
                    RepairKind::NumberFormat,
                    text,
                    i,
                    token,
                    &replacement,
                ));
                out.push_str(&replacement);
                i += token.len();
                continue;
            }
        }
        out.push(c);
        i += l;
    }
    out
}

/// Match `[+-]?0[xX|oO|bB]<digits>` at `start` with the digit set of the
/// prefix. Returns the full token, its value, and the sign.
fn match_radix_literal(text: &str, start: usize) -> Option<(&str, u128, bool)> {
    let bytes = text.as_bytes();
    let mut j = start;
    let mut negative = false;
    match bytes[j] {
        b'+' => j += 1,
        b'-' => {
            negative = true;
            j += 1;
        }
        _ => {}
    }
    if bytes.get(j) != Some(&b'0') {
        return None;
    }
    let radix = match bytes.get(j + 1).copied() {
        Some(b'x') | Some(b'X') => 16,
        Some(b'o') | Some(b'O') => 8,
        Some(b'b') | Some(b'B') => 2,
        _ => return None,
    };
    let digits_start = j + 2;
    let mut end = digits_start;
    while end < bytes.len() {
        let d = bytes[end] as char;
        let ok = match radix {
            16 => d.is_ascii_hexdigit(),
            8 => ('0'..='7').contains(&d),
            _ => d == '0' || d == '1',
        };
        if !ok {
            break;
        }
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    if !boundary_ok(text, start, end) {
        return None;
    }
    let value = u128::from_str_radix(&text[digits_start..end], radix).ok()?;
    Some((&text[start..end], value, negative))
}

//! In-string escape repairs: stray backslashes, literal newlines, and raw
//! control characters.

use crate::repair::{Repair, RepairKind};
use crate::scan::{CharContext, StringState};

/// Escapes JSON accepts after a backslash (besides `\uXXXX`).
fn is_valid_escape(b: u8) -> bool {
    matches!(b, b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't')
}

/// Escapes that a Windows-path string turns into literal backslashes:
/// `C:\Users\name` means directories, not a newline. `\\` and `\"` keep
/// their escape meaning even there.
fn is_drive_sensitive_escape(b: u8) -> bool {
    matches!(b, b'n' | b't' | b'b' | b'f' | b'r' | b'/')
}

fn has_four_hex(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4].iter().all(|b| b.is_ascii_hexdigit())
}

/// A string whose content starts `X:` with `X` a letter is read as a
/// Windows path.
fn is_drive_letter_string(rest: &str) -> bool {
    let b = rest.as_bytes();
    b.len() >= 2 && (b[0] as char).is_ascii_alphabetic() && b[1] == b':'
}

/// Double every `\` inside a string that does not begin a valid JSON
/// escape. Valid escapes and `\uXXXX` pass through, except that in a
/// drive-letter string the single-letter escapes are doubled too.
pub(crate) fn fix_unescaped_backslashes(text: &str, log: &mut Vec<Repair>) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len() + 8);
    let mut in_string = false;
    let mut drive = false;
    let mut i = 0usize;
    while i < text.len() {
        let c = text[i..].chars().next().unwrap();
        let l = c.len_utf8();
        if !in_string {
            if c == '"' {
                in_string = true;
                drive = is_drive_letter_string(&text[i + 1..]);
            }
            out.push(c);
            i += l;
            continue;
        }
        match c {
            '"' => {
                in_string = false;
                out.push('"');
                i += 1;
            }
            '\\' => {
                let next = bytes.get(i + 1).copied();
                match next {
                    None => {
                        // Dangling backslash at end of input.
                        out.push_str("\\\\");
                        log.push(Repair::new(
                            RepairKind::UnescapedBackslash,
                            text,
                            i,
                            "\\",
                            "\\\\",
                        ));
                        i += 1;
                    }
                    Some(b'u') if has_four_hex(&bytes[i + 2..]) => {
                        out.push_str("\\u");
                        i += 2;
                    }
                    Some(n) if is_valid_escape(n) && !(drive && is_drive_sensitive_escape(n)) => {
                        out.push('\\');
                        out.push(n as char);
                        i += 2;
                    }
                    Some(_) => {
                        out.push_str("\\\\");
                        log.push(Repair::new(
                            RepairKind::UnescapedBackslash,
                            text,
                            i,
                            "\\",
                            "\\\\",
                        ));
                        i += 1;
                    }
                }
            }
            _ => {
                out.push(c);
                i += l;
            }
        }
    }
    out
}

/// Replace literal LF / CR inside strings with `\n` / `\r`.
pub(crate) fn escape_newlines_in_strings(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    for (i, c) in text.char_indices() {
        let ctx = st.step(c);
        if ctx == CharContext::Content && (c == '\n' || c == '\r') {
            let replacement = if c == '\n' { "\\n" } else { "\\r" };
            log.push(Repair::new(
                RepairKind::UnescapedNewline,
                text,
                i,
                c.encode_utf8(&mut [0u8; 4]),
                replacement,
            ));
            out.push_str(replacement);
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape raw ASCII control characters (0x00–0x1F) inside strings. LF is
/// the newline stage's job and is left alone here.
pub(crate) fn escape_control_characters(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut st = StringState::default();
    for (i, c) in text.char_indices() {
        let ctx = st.step(c);
        if ctx == CharContext::Content && (c as u32) < 0x20 && c != '\n' {
            let replacement = match c {
                '\t' => "\\t".to_string(),
                '\r' => "\\r".to_string(),
                '\u{08}' => "\\b".to_string(),
                '\u{0C}' => "\\f".to_string(),
                _ => format!("\\u{:04x}", c as u32),
            };
            log.push(Repair::new(
                RepairKind::ControlCharacter,
                text,
                i,
                c.encode_utf8(&mut [0u8; 4]),
                &replacement,
            ));
            out.push_str(&replacement);
        } else {
            out.push(c);
        }
    }
    out
}

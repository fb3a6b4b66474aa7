//! Quoting of bare identifiers in object-key position.

use crate::repair::{Repair, RepairKind};
use crate::scan::{CharContext, StringState, is_ident_start, is_ws, take_ident};

/// Wrap an identifier in `"` when it appears after `{` or `,` and is
/// followed by `:`.
///
/// JSON keywords are identifiers too: `{true: 1}` becomes `{"true": 1}`
/// rather than a type error. (The Python-literal stage runs later, so a
/// quoted `True` key is already protected by then.)
pub(crate) fn quote_unquoted_keys(text: &str, log: &mut Vec<Repair>) -> String {
    let mut out = String::with_capacity(text.len() + 8);
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
        if c == '{' || c == ',' {
            out.push(c);
            i += l;
            // Copy whitespace up to a potential key.
            while i < text.len() {
                let w = text[i..].chars().next().unwrap();
                if !is_ws(w) {
                    break;
                }
                out.push(w);
                i += w.len_utf8();
            }
            if i >= text.len() {
                break;
            }
            let k = text[i..].chars().next().unwrap();
            if is_ident_start(k) {
                let key = take_ident(text, i);
                let after_key = i + key.len();
                let colon = match crate::scan::next_non_ws(text, after_key) {
                    Some((ci, ':')) => Some(ci),
                    _ => None,
                };
                if let Some(ci) = colon {
                    log.push(Repair::new(
                        RepairKind::UnquotedKey,
                        text,
                        i,
                        key,
                        &format!("\"{}\"", key),
                    ));
                    out.push('"');
                    out.push_str(key);
                    out.push('"');
                    out.push_str(&text[after_key..ci]);
                    i = ci; // the colon re-enters the main loop
                }
            }
            continue;
        }
        out.push(c);
        i += l;
    }
    out
}

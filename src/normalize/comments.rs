//! Comment stripping: `//` and `#` to end of line, `/* ... */` blocks.

use memchr::memchr;

use crate::error::FixError;
use crate::repair::{Repair, RepairKind};

/// Strip comments outside strings. Line comments consume their terminating
/// newline; a block comment is replaced by a single space so adjacent
/// tokens stay separated. An unclosed `/*` cannot be normalized safely and
/// fails the pipeline.
pub(crate) fn strip_comments(text: &str, log: &mut Vec<Repair>) -> Result<String, FixError> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
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
        if in_string {
            match c {
                '\\' => escape_next = true,
                '"' => in_string = false,
                _ => {}
            }
            out.push(c);
            i += l;
            continue;
        }
        if c == '"' {
            in_string = true;
            out.push(c);
            i += l;
            continue;
        }

        if c == '/' && bytes.get(i + 1) == Some(&b'/') {
            // `https://` is a URL fragment, not a comment.
            if i > 0 && bytes[i - 1] == b':' {
                out.push('/');
                i += 1;
                continue;
            }
            let end = match memchr(b'\n', &bytes[i..]) {
                Some(off) => i + off + 1,
                None => text.len(),
            };
            let comment = text[i..end].trim_end_matches(['\n', '\r']);
            log.push(Repair::new(
                RepairKind::SingleLineComment,
                text,
                i,
                comment,
                "",
            ));
            i = end;
            continue;
        }
        if c == '#' {
            let end = match memchr(b'\n', &bytes[i..]) {
                Some(off) => i + off + 1,
                None => text.len(),
            };
            let comment = text[i..end].trim_end_matches(['\n', '\r']);
            log.push(Repair::new(RepairKind::HashComment, text, i, comment, ""));
            i = end;
            continue;
        }
        if c == '/' && bytes.get(i + 1) == Some(&b'*') {
            let end = match find_block_close(bytes, i + 2) {
                Some(e) => e,
                None => {
                    return Err(FixError::Pipeline {
                        message: "unclosed multi-line comment".to_string(),
                        position: i,
                    });
                }
            };
            log.push(Repair::new(
                RepairKind::MultiLineComment,
                text,
                i,
                &text[i..end],
                "",
            ));
            out.push(' ');
            i = end;
            continue;
        }

        out.push(c);
        i += l;
    }
    Ok(out)
}

/// Byte offset just past the `*/` closing a block comment, scanning from
/// `from`.
fn find_block_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut off = from;
    while let Some(p) = memchr(b'*', &bytes[off..]) {
        let idx = off + p;
        if bytes.get(idx + 1) == Some(&b'/') {
            return Some(idx + 2);
        }
        off = idx + 1;
    }
    None
}

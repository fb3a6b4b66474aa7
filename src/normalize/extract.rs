//! Outer-wrapper removal: BOM, markdown fences, and prose around the JSON.

use crate::repair::{Repair, RepairKind};
use crate::scan::{CharContext, StringState};

/// Strip a U+FEFF byte-order mark at offset 0. Silent: no repair is logged.
pub(crate) fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{FEFF}').unwrap_or(input)
}

const FENCE_LANG_TAGS: [&str; 4] = ["json", "jsonc", "javascript", "js"];

/// Unwrap a leading ```` ``` ```` fence, optionally tagged `json`/`jsonc`/
/// `javascript`/`js`. Returns `None` when the input is not fenced.
///
/// The body runs from the end of the opening fence line to the next line
/// whose trimmed content is exactly ```` ``` ````; with no closing fence the
/// body extends to end of input. Fences that occur mid-text are not
/// matched.
pub(crate) fn strip_markdown_fences(text: &str, log: &mut Vec<Repair>) -> Option<String> {
    let lead = text.trim_start();
    let after_ticks = lead.strip_prefix("```")?;

    let (tag_line, body) = match after_ticks.find('\n') {
        Some(nl) => (&after_ticks[..nl], &after_ticks[nl + 1..]),
        None => (after_ticks, ""),
    };
    let tag = tag_line.trim();
    if !tag.is_empty() && !FENCE_LANG_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
        return None;
    }

    let mut end = body.len();
    let mut off = 0usize;
    for line in body.split_inclusive('\n') {
        if line.trim() == "```" {
            end = off;
            break;
        }
        off += line.len();
    }

    let opening = format!("```{}", tag);
    log.push(Repair::new(
        RepairKind::MarkdownFenceRemoved,
        text,
        0,
        &opening,
        "",
    ));
    Some(body[..end].trim().to_string())
}

fn starts_with_comment(s: &str) -> bool {
    s.starts_with("//") || s.starts_with('#') || s.starts_with("/*")
}

/// Extract the first balanced `{...}` / `[...]` region from surrounding
/// prose. Returns `None` when nothing needs to change.
///
/// A postamble that begins with a comment marker is kept with the region so
/// the comment stripper can consume it. Input that itself begins with a
/// comment marker, or that contains no bracket at all, is left alone.
pub(crate) fn extract_json_from_text(text: &str, log: &mut Vec<Repair>) -> Option<String> {
    if starts_with_comment(text.trim_start()) {
        return None;
    }

    let start = text.find(['{', '['])?;

    // Walk from the opening bracket to its match, respecting strings.
    let mut st = StringState::default();
    let mut depth = 0usize;
    let mut end = None;
    for (off, c) in text[start..].char_indices() {
        if st.step(c) != CharContext::Outside {
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    end = Some(start + off + c.len_utf8());
                    break;
                }
            }
            _ => {}
        }
    }

    let preamble = &text[..start];
    let pre_removed = !preamble.trim().is_empty();

    let Some(end) = end else {
        // Unclosed candidate region: strip the preamble and let auto-close
        // finish the job.
        if !pre_removed {
            return None;
        }
        log.push(Repair::new(RepairKind::JsonExtracted, text, 0, preamble, ""));
        return Some(text[start..].to_string());
    };

    let postamble = &text[end..];
    let post_trimmed = postamble.trim_start();
    if starts_with_comment(post_trimmed) {
        if !pre_removed {
            return None;
        }
        log.push(Repair::new(RepairKind::JsonExtracted, text, 0, preamble, ""));
        return Some(text[start..].to_string());
    }

    let post_removed = !post_trimmed.trim_end().is_empty();
    if !pre_removed && !post_removed {
        return None;
    }
    if pre_removed {
        log.push(Repair::new(RepairKind::JsonExtracted, text, 0, preamble, ""));
    } else {
        log.push(Repair::new(RepairKind::JsonExtracted, text, end, postamble, ""));
    }
    Some(text[start..end].to_string())
}

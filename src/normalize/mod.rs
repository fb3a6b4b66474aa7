//! The normalization pipeline: a fixed, ordered sequence of text-to-text
//! transforms feeding the strict parser.
//!
//! The ordering is part of the contract. Wrapper removal runs before any
//! in-text transform; the backslash fix runs before the stages that add
//! backslashes; number and JavaScript-value conversion run before the
//! structural heuristics so `0xFF` and `NaN` read as single value tokens;
//! auto-close runs before trailing-comma removal so a comma at end of
//! input gains a bracket to sit behind and is then deleted.

mod comments;
mod escapes;
mod extract;
mod keys;
mod literals;
mod quotes;
mod structure;

use crate::error::FixError;
use crate::options::Options;
use crate::repair::Repair;

/// Run every enabled transform in order, appending to the caller's log.
pub(crate) fn run_pipeline(
    input: &str,
    opts: &Options,
    log: &mut Vec<Repair>,
) -> Result<String, FixError> {
    let mut text = extract::strip_bom(input).to_string();

    if opts.remove_markdown_fences {
        if let Some(t) = extract::strip_markdown_fences(&text, log) {
            text = t;
        }
    }
    if opts.extract_json {
        if let Some(t) = extract::extract_json_from_text(&text, log) {
            text = t;
        }
    }
    if opts.normalize_smart_quotes {
        text = quotes::normalize_smart_quotes(&text, log);
    }
    if opts.convert_single_quote_strings {
        text = quotes::convert_single_quote_strings(&text, log);
    }
    if opts.quote_unquoted_keys {
        text = keys::quote_unquoted_keys(&text, log);
    }
    if opts.convert_python_literals {
        text = literals::convert_python_literals(&text, log);
    }
    if opts.fix_unescaped_backslashes {
        text = escapes::fix_unescaped_backslashes(&text, log);
    }
    if opts.escape_newlines {
        text = escapes::escape_newlines_in_strings(&text, log);
    }
    if opts.escape_control_characters {
        text = escapes::escape_control_characters(&text, log);
    }
    if opts.remove_ellipsis_markers {
        text = structure::remove_ellipsis_markers(&text, log);
    }
    if opts.strip_comments {
        text = comments::strip_comments(&text, log)?;
    }
    if opts.convert_number_formats {
        text = literals::convert_number_formats(&text, log);
    }
    if opts.convert_javascript_values {
        text = literals::convert_javascript_values(&text, log);
    }
    if opts.fix_missing_colons {
        text = structure::fix_missing_colons(&text, log);
    }
    if opts.fix_unescaped_quotes {
        text = quotes::fix_unescaped_quotes(&text, log);
    }
    if opts.fix_missing_commas {
        text = structure::fix_missing_commas(&text, log);
    }
    if opts.auto_close_brackets {
        text = structure::auto_close_brackets(&text, log);
    }
    if opts.remove_trailing_commas {
        text = structure::remove_trailing_commas(&text, log);
    }
    if opts.remove_double_commas {
        text = structure::remove_double_commas(&text, log);
    }
    Ok(text)
}

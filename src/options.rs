use std::str::FromStr;

use crate::error::FixError;

/// What the driver does once the pipeline has finished and the repair log
/// is populated.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum OnRepair {
    /// Parse silently.
    #[default]
    Ignore,
    /// Emit one `tracing` warning per repair.
    Warn,
    /// Fail on the first repair, before the strict parse runs.
    Error,
}

impl FromStr for OnRepair {
    type Err = FixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(OnRepair::Ignore),
            "warn" => Ok(OnRepair::Warn),
            "error" => Ok(OnRepair::Error),
            other => Err(FixError::InvalidOption(other.to_string())),
        }
    }
}

/// One switch per pipeline transform, all enabled by default, plus the
/// strict-mode bypass and the repair-dispatch policy.
#[derive(Clone, Debug)]
pub struct Options {
    /// Skip the whole pipeline and hand the input to the strict parser.
    pub strict: bool,
    /// Remove a trailing comma before `]` or `}`.
    pub remove_trailing_commas: bool,
    /// Strip `//`, `#`, and `/* ... */` comments outside strings.
    pub strip_comments: bool,
    /// Map curly/angle/prime quote variants to ASCII `"` or `'`.
    pub normalize_smart_quotes: bool,
    /// Rewrite `'string'` to `"string"`.
    pub convert_single_quote_strings: bool,
    /// Wrap bare identifiers in key position in `"`.
    pub quote_unquoted_keys: bool,
    /// Rewrite `True`/`False`/`None` to `true`/`false`/`null`.
    pub convert_python_literals: bool,
    /// Replace literal LF/CR inside strings with `\n`/`\r`.
    pub escape_newlines: bool,
    /// Append missing `}`/`]` at end of input.
    pub auto_close_brackets: bool,
    /// Drop `...` / `…` truncation markers (and a leading comma).
    pub remove_ellipsis_markers: bool,
    /// Extract the first bracketed region from surrounding prose.
    pub extract_json: bool,
    /// Unwrap a leading ```` ```json ```` fence.
    pub remove_markdown_fences: bool,
    /// Escape `"` inside strings when heuristics classify it as internal.
    pub fix_unescaped_quotes: bool,
    /// Insert `:` between a key string and its value.
    pub fix_missing_colons: bool,
    /// Insert `,` between adjacent values.
    pub fix_missing_commas: bool,
    /// Escape raw ASCII control characters inside strings.
    pub escape_control_characters: bool,
    /// Double a `\` that does not start a valid JSON escape.
    pub fix_unescaped_backslashes: bool,
    /// Rewrite `NaN`/`Infinity`/`undefined` (and signed Infinity) to `null`.
    pub convert_javascript_values: bool,
    /// Rewrite `0x`/`0o`/`0b` literals to decimal.
    pub convert_number_formats: bool,
    /// Drop consecutive or leading commas.
    pub remove_double_commas: bool,
    /// Repair-dispatch policy applied after the pipeline.
    pub on_repair: OnRepair,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strict: false,
            remove_trailing_commas: true,
            strip_comments: true,
            normalize_smart_quotes: true,
            convert_single_quote_strings: true,
            quote_unquoted_keys: true,
            convert_python_literals: true,
            escape_newlines: true,
            auto_close_brackets: true,
            remove_ellipsis_markers: true,
            extract_json: true,
            remove_markdown_fences: true,
            fix_unescaped_quotes: true,
            fix_missing_colons: true,
            fix_missing_commas: true,
            escape_control_characters: true,
            fix_unescaped_backslashes: true,
            convert_javascript_values: true,
            convert_number_formats: true,
            remove_double_commas: true,
            on_repair: OnRepair::Ignore,
        }
    }
}

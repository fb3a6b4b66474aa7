//! Repair records: structured descriptions of every edit the pipeline makes.

use memchr::{memchr_iter, memrchr};
use serde::Serialize;

/// The closed set of repairs the pipeline can perform. Each tag corresponds
/// to exactly one normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    TrailingComma,
    SingleLineComment,
    MultiLineComment,
    HashComment,
    SmartQuote,
    SingleQuoteString,
    UnquotedKey,
    PythonLiteral,
    UnescapedNewline,
    MissingBracket,
    TruncationMarker,
    MarkdownFenceRemoved,
    JsonExtracted,
    MissingColon,
    MissingComma,
    ControlCharacter,
    UnescapedBackslash,
    UnescapedQuote,
    DoubleComma,
    JavascriptValue,
    NumberFormat,
}

/// Record of a single repair.
///
/// `position` is a 0-indexed byte offset into the input of the transform
/// that produced the record; for transforms early in the pipeline this is
/// the original input. `line` and `column` are 1-indexed, with `column`
/// counted in characters from the last newline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repair {
    pub kind: RepairKind,
    pub position: usize,
    pub line: usize,
    pub column: usize,
    /// The substring that was replaced (empty for a pure insertion).
    pub original: String,
    /// The substring inserted (empty for a pure deletion).
    pub replacement: String,
    /// Human-readable description, templated per kind.
    pub message: String,
}

impl Repair {
    /// Build a record anchored at `position` within `text`, deriving
    /// line/column and the kind-specific message.
    pub(crate) fn new(
        kind: RepairKind,
        text: &str,
        position: usize,
        original: &str,
        replacement: &str,
    ) -> Self {
        let position = position.min(text.len());
        let (line, column) = line_column(text, position);
        let message = message_for(kind, original, replacement);
        Self {
            kind,
            position,
            line,
            column,
            original: original.to_string(),
            replacement: replacement.to_string(),
            message,
        }
    }
}

/// 1-indexed line/column for a byte offset, counting newlines before it.
pub(crate) fn line_column(text: &str, position: usize) -> (usize, usize) {
    let position = position.min(text.len());
    let before = &text.as_bytes()[..position];
    let line = memchr_iter(b'\n', before).count() + 1;
    let line_start = memrchr(b'\n', before).map(|i| i + 1).unwrap_or(0);
    let column = text[line_start..position].chars().count() + 1;
    (line, column)
}

fn preview(s: &str) -> String {
    if s.chars().count() > 30 {
        let cut: String = s.chars().take(30).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}

fn message_for(kind: RepairKind, original: &str, replacement: &str) -> String {
    match kind {
        RepairKind::TrailingComma => "Removed trailing comma".to_string(),
        RepairKind::SingleLineComment => {
            format!("Removed single-line comment '{}'", preview(original))
        }
        RepairKind::MultiLineComment => {
            format!("Removed multi-line comment '{}'", preview(original))
        }
        RepairKind::HashComment => format!("Removed hash comment '{}'", preview(original)),
        RepairKind::SmartQuote => {
            format!("Replaced smart quote '{}' with '{}'", original, replacement)
        }
        RepairKind::SingleQuoteString => format!(
            "Converted single-quoted string '{}' to double quotes",
            preview(original)
        ),
        RepairKind::UnquotedKey => format!("Added quotes around unquoted key '{}'", original),
        RepairKind::PythonLiteral => format!(
            "Converted Python literal '{}' to JSON '{}'",
            original, replacement
        ),
        RepairKind::UnescapedNewline => "Escaped literal newline in string".to_string(),
        RepairKind::MissingBracket => {
            format!("Added missing closing bracket '{}'", replacement)
        }
        RepairKind::TruncationMarker => {
            format!("Removed truncation marker '{}'", preview(original))
        }
        RepairKind::MarkdownFenceRemoved => "Removed markdown code fence".to_string(),
        RepairKind::JsonExtracted => "Extracted JSON from surrounding text".to_string(),
        RepairKind::MissingColon => "Inserted missing colon between key and value".to_string(),
        RepairKind::MissingComma => "Inserted missing comma between elements".to_string(),
        RepairKind::ControlCharacter => format!(
            "Escaped control character '{}' in string",
            original.escape_debug()
        ),
        RepairKind::UnescapedBackslash => "Escaped stray backslash in string".to_string(),
        RepairKind::UnescapedQuote => "Escaped unescaped quote in string".to_string(),
        RepairKind::DoubleComma => "Removed duplicate comma".to_string(),
        RepairKind::JavascriptValue => {
            format!("Converted JavaScript value '{}' to null", original)
        }
        RepairKind::NumberFormat => format!(
            "Converted number literal '{}' to decimal '{}'",
            original, replacement
        ),
    }
}

//! Shared string-context scanning used by every normalizer.
//!
//! Each normalizer is a linear pass over its input text, and they all have
//! to agree on one thing: whether a given position is inside a JSON string
//! literal. That decision lives here, in one two-state DFA, so two
//! transforms can never disagree on whether a `"` opens or closes a string.

/// Two-state DFA over string context.
///
/// Outside a string, an unescaped `"` enters it; inside, a `\` marks the
/// next character as literal and an unescaped `"` exits.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StringState {
    in_string: bool,
    escape_next: bool,
}

/// How the character just fed to [`StringState::step`] should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharContext {
    /// Structural text outside any string literal.
    Outside,
    /// An unescaped `"`; the state has already toggled.
    Delim,
    /// Ordinary string content.
    Content,
    /// A `\` starting an escape sequence inside a string.
    EscapeStart,
    /// The character completing an escape sequence.
    Escaped,
}

impl StringState {
    pub(crate) fn step(&mut self, c: char) -> CharContext {
        if self.escape_next {
            self.escape_next = false;
            return CharContext::Escaped;
        }
        if self.in_string && c == '\\' {
            self.escape_next = true;
            return CharContext::EscapeStart;
        }
        if c == '"' {
            self.in_string = !self.in_string;
            return CharContext::Delim;
        }
        if self.in_string {
            CharContext::Content
        } else {
            CharContext::Outside
        }
    }
}

/// LIFO record of unmatched `{` / `[`, for object-vs-array decisions and
/// auto-closing.
#[derive(Debug, Default)]
pub(crate) struct BracketStack {
    stack: Vec<u8>,
}

impl BracketStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed a structural character seen *outside* strings. Non-bracket
    /// characters are ignored; mismatched closers leave the stack alone.
    pub(crate) fn observe(&mut self, c: char) {
        match c {
            '{' | '[' => self.stack.push(c as u8),
            '}' => {
                if self.stack.last() == Some(&b'{') {
                    self.stack.pop();
                }
            }
            ']' => {
                if self.stack.last() == Some(&b'[') {
                    self.stack.pop();
                }
            }
            _ => {}
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn in_object(&self) -> bool {
        self.stack.last() == Some(&b'{')
    }

    pub(crate) fn in_array(&self) -> bool {
        self.stack.last() == Some(&b'[')
    }

    /// Closing characters for every unmatched opener, innermost first.
    pub(crate) fn closers(&self) -> impl Iterator<Item = char> + '_ {
        self.stack
            .iter()
            .rev()
            .map(|&b| if b == b'{' { '}' } else { ']' })
    }
}

#[inline]
pub(crate) fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Next non-whitespace character at or after byte offset `from`.
pub(crate) fn next_non_ws(text: &str, from: usize) -> Option<(usize, char)> {
    if from > text.len() {
        return None;
    }
    text[from..]
        .char_indices()
        .find(|&(_, c)| !is_ws(c))
        .map(|(off, c)| (from + off, c))
}

/// Last non-whitespace character of an output buffer.
pub(crate) fn last_significant(out: &str) -> Option<char> {
    out.trim_end_matches(is_ws).chars().next_back()
}

#[inline]
pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

#[inline]
pub(crate) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// ASCII identifier starting at byte offset `from`; empty if none.
pub(crate) fn take_ident(text: &str, from: usize) -> &str {
    let bytes = text.as_bytes();
    let mut end = from;
    while end < bytes.len() {
        let c = bytes[end] as char;
        let ok = if end == from {
            is_ident_start(c)
        } else {
            is_ident_continue(c)
        };
        if !ok {
            break;
        }
        end += 1;
    }
    &text[from..end]
}

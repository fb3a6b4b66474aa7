//! Tolerant JSON parsing: accept "almost JSON" and return a strict value
//! tree plus a structured log of every repair performed.
//!
//! Input mangled by hand editing, LLM generation, or copy-paste (markdown
//! fences, prose around the payload, smart quotes, single-quoted strings,
//! unquoted keys, Python and JavaScript literals, missing punctuation,
//! truncated output) is run through a fixed pipeline of normalizers and
//! then handed to `serde_json`. Every edit is recorded as a [`Repair`]
//! anchored to the text the repairing stage saw.
//!
//! ```
//! use jsonfix::{loads_relaxed, Options};
//!
//! let (value, repairs) = loads_relaxed("{name: 'John', age: 30,}", &Options::default())?;
//! assert_eq!(value["name"], "John");
//! assert_eq!(value["age"], 30);
//! assert_eq!(repairs.len(), 4); // quoted string, two bare keys, trailing comma
//! # Ok::<(), jsonfix::FixError>(())
//! ```

pub mod cli;
pub mod error;
mod normalize;
pub mod options;
mod repair;
mod scan;

pub use error::FixError;
pub use options::{OnRepair, Options};
pub use repair::{Repair, RepairKind};

use serde_json::Value;

// ============================================================================
// Core API - parse to value
// ============================================================================

/// Parse a relaxed JSON string into a value tree, returning the repair log
/// alongside it.
///
/// With `opts.strict` the pipeline is skipped entirely and the input goes
/// straight to the strict parser. Otherwise every enabled normalizer runs
/// in pipeline order, the `on_repair` policy is applied, and the
/// normalized text is parsed.
///
/// # Examples
///
/// ```
/// use jsonfix::{loads_relaxed, Options, RepairKind};
///
/// let (value, repairs) = loads_relaxed("[1, 2, 3,]", &Options::default())?;
/// assert_eq!(value, serde_json::json!([1, 2, 3]));
/// assert_eq!(repairs[0].kind, RepairKind::TrailingComma);
/// # Ok::<(), jsonfix::FixError>(())
/// ```
pub fn loads_relaxed(input: &str, opts: &Options) -> Result<(Value, Vec<Repair>), FixError> {
    let mut log = Vec::new();
    let value = loads_relaxed_with_log(input, opts, &mut log)?;
    Ok((value, log))
}

/// Like [`loads_relaxed`], but appends repairs to a caller-owned log.
///
/// The container is only ever appended to, so one log can collect repairs
/// across several calls, and it keeps whatever was recorded before a
/// failure.
pub fn loads_relaxed_with_log(
    input: &str,
    opts: &Options,
    log: &mut Vec<Repair>,
) -> Result<Value, FixError> {
    if opts.strict {
        return Ok(serde_json::from_str(input)?);
    }
    let text = normalize::run_pipeline(input, opts, log)?;
    match opts.on_repair {
        OnRepair::Ignore => {}
        OnRepair::Warn => {
            for r in log.iter() {
                tracing::warn!(line = r.line, column = r.column, "JSON repair: {}", r.message);
            }
        }
        OnRepair::Error => {
            if let Some(first) = log.first() {
                return Err(FixError::RepairNeeded {
                    line: first.line,
                    column: first.column,
                    message: first.message.clone(),
                });
            }
        }
    }
    Ok(serde_json::from_str(&text)?)
}

/// Read a reader to EOF and delegate to [`loads_relaxed`].
///
/// # Examples
///
/// ```no_run
/// use jsonfix::{load_relaxed, Options};
/// use std::fs::File;
///
/// let file = File::open("almost.json")?;
/// let (value, _repairs) = load_relaxed(file, &Options::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_relaxed<R: std::io::Read>(
    mut reader: R,
    opts: &Options,
) -> Result<(Value, Vec<Repair>), FixError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    loads_relaxed(&content, opts)
}

/// True iff the input parses under the default options.
///
/// # Examples
///
/// ```
/// assert!(jsonfix::can_parse("{'a': 1,}"));
/// assert!(!jsonfix::can_parse("{\"a\": /* unclosed"));
/// ```
pub fn can_parse(input: &str) -> bool {
    loads_relaxed(input, &Options::default()).is_ok()
}

/// The repairs a default parse would perform, errors discarded.
///
/// When the pipeline or the strict parse fails the log may be partial; it
/// still holds everything recorded up to the failure.
///
/// # Examples
///
/// ```
/// use jsonfix::RepairKind;
///
/// let repairs = jsonfix::get_repairs("{\"a\": 1,}");
/// assert_eq!(repairs[0].kind, RepairKind::TrailingComma);
/// ```
pub fn get_repairs(input: &str) -> Vec<Repair> {
    let mut log = Vec::new();
    let opts = Options::default();
    if let Ok(text) = normalize::run_pipeline(input, &opts, &mut log) {
        let _ = serde_json::from_str::<Value>(&text);
    }
    log
}

// ============================================================================
// String output
// ============================================================================

/// Repair and canonicalize to a compact strict-JSON string.
///
/// The text goes through the pipeline, the strict parser, and a strict
/// re-serialization, so the result is guaranteed valid JSON.
///
/// # Examples
///
/// ```
/// use jsonfix::{fix_to_string, Options};
///
/// let (fixed, _repairs) = fix_to_string("{a: 'x',}", &Options::default())?;
/// assert_eq!(fixed, "{\"a\":\"x\"}");
/// # Ok::<(), jsonfix::FixError>(())
/// ```
pub fn fix_to_string(input: &str, opts: &Options) -> Result<(String, Vec<Repair>), FixError> {
    let (value, log) = loads_relaxed(input, opts)?;
    Ok((serde_json::to_string(&value)?, log))
}

#[cfg(test)]
mod tests;

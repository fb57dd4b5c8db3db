//! Raw document handling: parsing, structural validation, titles, export.
//!
//! Documents travel through here as `serde_json::Value` items so that
//! partially-understood input survives a parse → edit → export round trip
//! byte-for-byte in content. The typed structs in the crate root are the
//! decoded view the form works with.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

// --- Errors ---

/// The two recoverable failure modes of loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    /// The input text is not JSON. The underlying decoder message is not
    /// surfaced; users get the fixed text.
    Parse,
    /// The JSON decoded but at least one item is missing its discriminant
    /// fields. No per-item diagnostics, a single fixed message.
    Structure,
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Parse => write!(f, "Invalid JSON format"),
            DocumentError::Structure => write!(
                f,
                "Invalid JAQL structure. Each filter must have an instanceid \
                 and either jaql or isCascading property."
            ),
        }
    }
}

impl std::error::Error for DocumentError {}

// --- Parsing ---

/// Decode pasted text into a list of filter items. A top-level object is
/// wrapped into a one-element list so downstream code always sees a list.
pub fn parse_document(input: &str) -> Result<Vec<Value>, DocumentError> {
    let parsed: Value = serde_json::from_str(input).map_err(|_| DocumentError::Parse)?;
    Ok(match parsed {
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// JS truthiness on a raw value: absent, null, false, 0 and "" are falsy,
/// everything else (objects and arrays included) is truthy.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Minimal structural check: every item needs a string `instanceid` and a
/// truthy `jaql` or `isCascading`. Deliberately a bare bool — the form
/// defensively renders anything that gets past this, so the validator does
/// not enumerate nested fields or report which item failed.
pub fn validate_structure(items: &[Value]) -> bool {
    items.iter().all(|item| {
        let has_instanceid = matches!(item.get("instanceid"), Some(Value::String(_)));
        let has_branch = truthy(item.get("jaql")) || truthy(item.get("isCascading"));
        has_instanceid && has_branch
    })
}

// --- Titles ---

fn nonempty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Display title for an item: `jaql.title`, else `jaql.column`, else the
/// first cascading level's title, else "Filter {instanceid}".
pub fn filter_title(item: &Value) -> String {
    if let Some(title) = nonempty_str(item.pointer("/jaql/title")) {
        return title.to_string();
    }
    if let Some(column) = nonempty_str(item.pointer("/jaql/column")) {
        return column.to_string();
    }
    if let Some(level_title) = nonempty_str(item.pointer("/levels/0/title")) {
        return level_title.to_string();
    }
    let id = item.get("instanceid").and_then(Value::as_str).unwrap_or("");
    format!("Filter {}", id)
}

// --- Export ---

/// Serialize the item list back to 2-space-indented JSON. `Value` trees
/// always serialize, so this cannot fail in practice.
pub fn export_document(items: &[Value]) -> String {
    serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string())
}

/// Default file name for a saved export, stamped with a `YYYY-MM-DD` date.
pub fn export_file_name(date: &str) -> String {
    format!("jaql-filters-{}.json", date)
}

/// Write an export to disk atomically (temp file + rename) so a failed write
/// never leaves a truncated file under the user's chosen name.
pub fn write_export(path: &Path, data: &str) -> Result<(), String> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("export.json");
    let tmp = dir.join(format!(".{}.tmp", file_name));
    fs::write(&tmp, data).map_err(|e| e.to_string())?;
    fs::rename(&tmp, path).map_err(|e| e.to_string())
}

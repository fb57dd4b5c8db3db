//! Field edits: the generic dot-path updater and the typed edit layer the
//! form actually drives.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Filter;

// --- Path updater ---

/// Apply a single field change at a dot-separated path, e.g.
/// `jaql.filter.members`. Returns a new item; the input is untouched.
///
/// Missing intermediate segments are created as empty objects on the way
/// down, so an update can introduce structure that was not in the document.
/// The leaf is assigned verbatim — no coercion, no validation. Segments are
/// literal keys: an empty path or a trailing dot writes under the key `""`.
/// Intermediate segments holding a non-object are replaced by an object.
pub fn update_filter_value(item: &Value, field_path: &str, value: Value) -> Value {
    let mut updated = item.clone();

    let mut segments: Vec<&str> = field_path.split('.').collect();
    // split always yields at least one segment
    let leaf = segments.pop().unwrap_or("");

    assign_at(&mut updated, &segments, leaf, value);
    updated
}

fn assign_at(target: &mut Value, segments: &[&str], leaf: &str, value: Value) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        match segments.split_first() {
            Some((head, rest)) => {
                let child = map
                    .entry(*head)
                    .or_insert_with(|| Value::Object(Map::new()));
                assign_at(child, rest, leaf, value);
            }
            None => {
                map.insert(leaf.to_string(), value);
            }
        }
    }
}

// --- Typed edits ---

/// The editable fields of a filter item, as a closed set. The path updater
/// underneath accepts any path; the form only ever produces these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FilterEdit {
    Explicit(bool),
    All(bool),
    MultiSelection(bool),
    Members(Vec<String>),
    Disabled(bool),
}

impl FilterEdit {
    /// Dot path the edit writes through.
    pub fn field_path(&self) -> &'static str {
        match self {
            FilterEdit::Explicit(_) => "jaql.filter.explicit",
            FilterEdit::All(_) => "jaql.filter.all",
            FilterEdit::MultiSelection(_) => "jaql.filter.multiSelection",
            FilterEdit::Members(_) => "jaql.filter.members",
            FilterEdit::Disabled(_) => "disabled",
        }
    }

    fn value(&self) -> Value {
        match self {
            FilterEdit::Explicit(v)
            | FilterEdit::All(v)
            | FilterEdit::MultiSelection(v)
            | FilterEdit::Disabled(v) => Value::Bool(*v),
            FilterEdit::Members(members) => {
                Value::Array(members.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// Apply a typed edit to an item. `explicit` and `all` are mutually
/// exclusive: turning one on turns the other off in the same step. Fields
/// that are not edited keep whatever the document loaded with — a document
/// that arrived with both flags true exports both true until one is edited.
pub fn apply_edit(item: &Value, edit: &FilterEdit) -> Value {
    let updated = update_filter_value(item, edit.field_path(), edit.value());
    match edit {
        FilterEdit::Explicit(true) => {
            update_filter_value(&updated, "jaql.filter.all", Value::Bool(false))
        }
        FilterEdit::All(true) => {
            update_filter_value(&updated, "jaql.filter.explicit", Value::Bool(false))
        }
        _ => updated,
    }
}

// --- Member lists ---

/// Replace the member at `index`. Out-of-range indexes leave the list
/// unchanged.
pub fn set_member(members: &[String], index: usize, value: String) -> Vec<String> {
    let mut next = members.to_vec();
    if let Some(slot) = next.get_mut(index) {
        *slot = value;
    }
    next
}

/// Append an empty member slot for the form to fill in.
pub fn add_member(members: &[String]) -> Vec<String> {
    let mut next = members.to_vec();
    next.push(String::new());
    next
}

/// Remove the member at `index`. Out-of-range indexes leave the list
/// unchanged.
pub fn remove_member(members: &[String], index: usize) -> Vec<String> {
    let mut next = members.to_vec();
    if index < next.len() {
        next.remove(index);
    }
    next
}

/// The members the form shows: all of them under multi-selection, at most
/// the first otherwise.
pub fn visible_members(filter: &Filter) -> &[String] {
    let members = filter.members.as_deref().unwrap_or(&[]);
    if filter.multi_selection.unwrap_or(false) {
        members
    } else {
        &members[..members.len().min(1)]
    }
}

/// Whether "+ Add Member" is available: always under multi-selection,
/// otherwise only while the list is empty.
pub fn can_add_member(filter: &Filter) -> bool {
    filter.multi_selection.unwrap_or(false)
        || filter.members.as_ref().map_or(true, |m| m.is_empty())
}

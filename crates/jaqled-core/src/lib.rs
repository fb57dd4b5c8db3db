pub mod dates;
pub mod doc;
pub mod edit;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// --- Types (matching src/types.ts) ---

/// The mutable leaf of a filter item: member selection flags and values.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Filter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
    #[serde(rename = "multiSelection", skip_serializing_if = "Option::is_none")]
    pub multi_selection: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column metadata for a non-cascading filter. Only `filter` is ever edited;
/// the named fields are what the form displays, everything else rides along
/// in `extra` and round-trips unchanged (datasource, dim, locale, ...).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Jaql {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub filter: Filter,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One level of a cascading filter. Read-only in the form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct JaqlLevel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single filter definition in a document: either a simple filter
/// (`jaql`) or a cascading one (`isCascading` + `levels`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterItem {
    pub instanceid: String,
    #[serde(rename = "isCascading", default)]
    pub is_cascading: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jaql: Option<Jaql>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<JaqlLevel>>,
    /// Opaque passthrough data, never edited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A filter item plus the transient editing state the form keeps while a
/// value is in flight. `tempValues` never reaches the export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    #[serde(flatten)]
    pub item: FilterItem,
    #[serde(
        rename = "tempValues",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temp_values: Option<Map<String, Value>>,
}

// --- Filter kind ---

/// Which form a filter item gets. Items that carry neither a usable `jaql`
/// nor cascading levels are `Unsupported` — an explicit variant, so the form
/// handles them by construction instead of falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Simple,
    Cascading,
    Unsupported,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Simple => "simple",
            FilterKind::Cascading => "cascading",
            FilterKind::Unsupported => "unsupported",
        }
    }
}

impl FilterItem {
    pub fn kind(&self) -> FilterKind {
        if !self.is_cascading && self.jaql.is_some() {
            FilterKind::Simple
        } else if self.is_cascading && self.levels.is_some() {
            FilterKind::Cascading
        } else {
            FilterKind::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_simple_needs_jaql() {
        let item: FilterItem = serde_json::from_value(json!({
            "instanceid": "A1",
            "isCascading": false,
            "jaql": { "title": "Brand", "filter": { "all": true } }
        }))
        .unwrap();
        assert_eq!(item.kind(), FilterKind::Simple);
    }

    #[test]
    fn kind_cascading_needs_levels() {
        let item: FilterItem = serde_json::from_value(json!({
            "instanceid": "A2",
            "isCascading": true,
            "levels": [{ "title": "Country" }, { "title": "City" }]
        }))
        .unwrap();
        assert_eq!(item.kind(), FilterKind::Cascading);

        // Cascading flag without levels is unsupported, not a silent default.
        let bare: FilterItem = serde_json::from_value(json!({
            "instanceid": "A3",
            "isCascading": true
        }))
        .unwrap();
        assert_eq!(bare.kind(), FilterKind::Unsupported);
    }

    #[test]
    fn unknown_keys_round_trip() {
        let raw = json!({
            "instanceid": "B1",
            "isCascading": false,
            "disabled": false,
            "jaql": {
                "table": "Commerce",
                "column": "Brand",
                "dim": "[Commerce.Brand]",
                "datatype": "text",
                "title": "Brand",
                "datasource": { "title": "Sample ECommerce", "live": false },
                "filter": { "explicit": true, "members": ["Acme"], "custom": 7 }
            },
            "panel": "scope"
        });
        let item: FilterItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.extra.get("panel"), Some(&json!("scope")));
        let jaql = item.jaql.as_ref().unwrap();
        assert_eq!(jaql.extra.get("dim"), Some(&json!("[Commerce.Brand]")));
        assert!(jaql.extra.contains_key("datasource"));
        assert_eq!(jaql.filter.extra.get("custom"), Some(&json!(7)));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn state_keeps_temp_values_out_of_the_item() {
        let state: FilterState = serde_json::from_value(json!({
            "instanceid": "C1",
            "isCascading": false,
            "jaql": { "filter": {} },
            "tempValues": { "draft": "ongoing" }
        }))
        .unwrap();
        assert_eq!(state.item.instanceid, "C1");
        assert!(!state.item.extra.contains_key("tempValues"));
        let temp = state.temp_values.unwrap();
        assert_eq!(temp.get("draft"), Some(&json!("ongoing")));
    }
}

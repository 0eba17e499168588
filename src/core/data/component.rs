//! Per-component fact records produced by the analysis pipeline.
//!
//! These are the only artifacts consumers (CLI report, JSON output, library
//! callers) see. Field names serialize in camelCase and optional fields are
//! omitted when absent.

use serde::{Deserialize, Serialize};

/// Source position of a call site.
///
/// `line` is 1-based and `column` is 0-based. Both are 0 when the tree
/// carries no position for the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Facts about a single file judged to define a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    /// Resolved component name, possibly `"Found (FileName)"` when ambiguous.
    pub name: String,
    /// Path relative to the analysis root. This is the unique key.
    pub file_path: String,
    pub hooks: Vec<HookInfo>,
    pub states: Vec<StateInfo>,
    pub contexts: Vec<ContextInfo>,
    pub props: Vec<PropInfo>,
    pub store_usage: Vec<StoreInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookInfo {
    pub name: String,
    pub call_location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInfo {
    pub name: String,
    pub setter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextInfo {
    pub name: String,
    pub usage_locations: Vec<Location>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub context_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<usize>,
}

/// State-management library an external-store binding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Redux,
    Mobx,
    Recoil,
    Zustand,
    Jotai,
    Other,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Redux => "redux",
            StoreKind::Mobx => "mobx",
            StoreKind::Recoil => "recoil",
            StoreKind::Zustand => "zustand",
            StoreKind::Jotai => "jotai",
            StoreKind::Other => "other",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated usage of one store library inside a component.
///
/// `actions` and `selectors` behave as insertion-ordered sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(rename = "type")]
    pub kind: StoreKind,
    pub actions: Vec<String>,
    pub selectors: Vec<String>,
}

impl StoreInfo {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            actions: Vec::new(),
            selectors: Vec::new(),
        }
    }

    /// Insert an action marker. Returns false if it was already present.
    pub fn add_action(&mut self, action: impl Into<String>) -> bool {
        insert_unique(&mut self.actions, action.into())
    }

    /// Insert a rendered selector. Returns false if it was already present.
    pub fn add_selector(&mut self, selector: impl Into<String>) -> bool {
        insert_unique(&mut self.selectors, selector.into())
    }
}

fn insert_unique(entries: &mut Vec<String>, entry: String) -> bool {
    if entries.contains(&entry) {
        return false;
    }
    entries.push(entry);
    true
}

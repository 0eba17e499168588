//! Structural extraction of per-file component facts.
//!
//! - `vocabulary`: Closed tables of recognized hook and store-binding names
//! - `render`: Pure renderings of binding patterns, literals and selectors
//! - `file_analyzer`: The single-pass visitor producing hooks/states/contexts/stores
//! - `usage`: Scope-bounded reference counting for state variables and props

pub mod file_analyzer;
pub mod render;
pub mod usage;
pub mod vocabulary;

pub use file_analyzer::{ExtractOptions, ExtractedState, FileAnalyzer, FileExtraction};
pub use render::BindingPattern;
pub use usage::count_references;
pub use vocabulary::{HookKind, StoreBinding, StoreEntry, store_binding};

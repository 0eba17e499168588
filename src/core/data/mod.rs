//! Core data types produced by the analysis pipeline.
//!
//! ## Module Structure
//!
//! - `component`: ComponentInfo and its fact records (hooks, states, contexts, props, stores)
//! - `diagnostic`: Recovered per-file failures (read, parse, props)

pub mod component;
pub mod diagnostic;

pub use component::{
    ComponentInfo, ContextInfo, HookInfo, Location, PropInfo, StateInfo, StoreInfo, StoreKind,
};
pub use diagnostic::{Diagnostic, DiagnosticKind};

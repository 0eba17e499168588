//! Analysis engine: from source files to [`ComponentInfo`] records.
//!
//! ## Pipeline (per file)
//!
//! 1. `parsers::jsx`: parse TSX/JSX into an swc module
//! 2. `identity`: decide which component the file defines, if any
//! 3. `extract`: one traversal collecting hooks, states, contexts and store usage
//! 4. `extract::usage`: count references of each state variable in its scope
//! 5. `props`: merge declared props from the configured provider
//!
//! `analyzer` runs this over many files in parallel; `file_scanner` finds them.

pub mod analyzer;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod identity;
pub mod parsers;
pub mod props;

pub use analyzer::{
    AnalysisReport, AnalyzeOptions, Analyzer, FileAnalysis, Progress, analyze_file,
    analyze_source,
};
pub use context::AnalysisContext;
pub use data::{
    ComponentInfo, ContextInfo, Diagnostic, DiagnosticKind, HookInfo, Location, PropInfo,
    StateInfo, StoreInfo, StoreKind,
};

//! hooklens - structural extraction for React components
//!
//! hooklens is a CLI tool and library that reads React component files and
//! reports, per component, the hooks it calls, its local state, the contexts
//! it consumes, its external store usage (Redux, Recoil, Zustand, Jotai) and
//! its declared props.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Analysis engine (parse, identify, extract, count, props)
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

//! Props bridge: declared-interface extraction behind a provider seam.
//!
//! The analyzer never depends on how props are documented. A provider gets
//! the file and the resolved component identity and returns name/type/
//! required/default/description tuples plus an optional component
//! description. Failures stay local to the component (see `fetch_props`).
//!
//! ## Providers
//!
//! - `builtin`: reads TypeScript annotations and destructuring defaults from the parsed file
//! - `command`: runs an external documentation tool emitting react-docgen-typescript JSON
//! - `NoProps`: disabled

pub mod builtin;
pub mod command;

use anyhow::{Context, Result};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::core::identity::ComponentIdentity;
use crate::core::parsers::jsx::ParsedJSX;
use crate::core::PropInfo;

pub use builtin::BuiltinProps;
pub use command::CommandProps;

/// Everything a provider may need to document one component.
pub struct PropsRequest<'a> {
    /// Path of the file on disk.
    pub file_path: &'a str,
    pub parsed: &'a ParsedJSX,
    pub identity: &'a ComponentIdentity,
}

/// Declared interface of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropsDoc {
    pub props: Vec<PropInfo>,
    pub description: Option<String>,
}

impl PropsDoc {
    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.description.is_none()
    }
}

/// A source of declared-interface documentation.
#[enum_dispatch]
pub trait PropsProvider {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    fn fetch(&self, request: &PropsRequest<'_>) -> Result<PropsDoc>;
}

/// Provider that documents nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProps;

impl PropsProvider for NoProps {
    fn name(&self) -> &'static str {
        "none"
    }

    fn fetch(&self, _request: &PropsRequest<'_>) -> Result<PropsDoc> {
        Ok(PropsDoc::default())
    }
}

/// The configured props provider.
#[enum_dispatch(PropsProvider)]
#[derive(Debug, Clone)]
pub enum Provider {
    Builtin(BuiltinProps),
    Command(CommandProps),
    Disabled(NoProps),
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Builtin(BuiltinProps)
    }
}

/// Which provider to use, as written in config and on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Builtin,
    Command,
    #[serde(rename = "none")]
    #[value(name = "none")]
    Disabled,
}

/// Ask `provider` for a component's props.
///
/// Empty documentation is `Ok(None)`: components without declared props are
/// common and not a failure.
pub fn fetch_props(provider: &Provider, request: &PropsRequest<'_>) -> Result<Option<PropsDoc>> {
    let doc = provider
        .fetch(request)
        .with_context(|| format!("{} props provider failed", provider.name()))?;
    Ok((!doc.is_empty()).then_some(doc))
}

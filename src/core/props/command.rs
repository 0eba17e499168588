//! Props provider backed by an external documentation tool.
//!
//! The command is run once per component file with the file path appended as
//! the last argument. It must print react-docgen-typescript style JSON:
//!
//! ```json
//! [
//!   {
//!     "displayName": "Button",
//!     "description": "A clickable button.",
//!     "props": {
//!       "label": { "type": { "name": "string" }, "required": true, "description": "" }
//!     }
//!   }
//! ]
//! ```

use std::process::Command;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{PropsDoc, PropsProvider, PropsRequest};
use crate::core::PropInfo;
use crate::core::props::builtin::UNKNOWN_TYPE;

#[derive(Debug, Clone, Default)]
pub struct CommandProps {
    /// Program followed by its leading arguments.
    pub command: Vec<String>,
}

impl CommandProps {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl PropsProvider for CommandProps {
    fn name(&self) -> &'static str {
        "command"
    }

    fn fetch(&self, request: &PropsRequest<'_>) -> Result<PropsDoc> {
        let Some((program, args)) = self.command.split_first() else {
            bail!("no props command configured");
        };

        let output = Command::new(program)
            .args(args)
            .arg(request.file_path)
            .output()
            .with_context(|| format!("Failed to run props command `{}`", program))?;

        if !output.status.success() {
            bail!(
                "props command `{}` exited with {}: {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let docs = parse_docgen_output(&stdout)?;
        if docs.is_empty() {
            bail!("props command documented no components");
        }
        let wanted = request
            .identity
            .binding
            .as_deref()
            .unwrap_or(&request.identity.name);
        Ok(select_doc(docs, wanted))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocgenComponent {
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    props: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocgenProp {
    #[serde(rename = "type")]
    prop_type: Option<DocgenType>,
    #[serde(default)]
    required: bool,
    default_value: Option<DocgenDefault>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct DocgenType {
    name: String,
}

#[derive(Debug, Deserialize)]
struct DocgenDefault {
    value: Value,
}

fn parse_docgen_output(stdout: &str) -> Result<Vec<DocgenComponent>> {
    serde_json::from_str(stdout).context("props command printed invalid JSON")
}

/// Pick the doc for `wanted` (else the first one) and convert it.
fn select_doc(docs: Vec<DocgenComponent>, wanted: &str) -> PropsDoc {
    let index = docs
        .iter()
        .position(|doc| doc.display_name == wanted)
        .unwrap_or(0);
    let Some(doc) = docs.into_iter().nth(index) else {
        return PropsDoc::default();
    };

    let props = doc
        .props
        .into_iter()
        .filter_map(|(name, value)| {
            let prop: DocgenProp = serde_json::from_value(value).ok()?;
            Some(PropInfo {
                name,
                prop_type: prop
                    .prop_type
                    .map(|t| t.name)
                    .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
                required: prop.required,
                default_value: prop.default_value.map(|d| match d.value {
                    Value::String(s) => s,
                    other => other.to_string(),
                }),
                description: non_empty(prop.description),
                usage_count: None,
            })
        })
        .collect();

    PropsDoc {
        props,
        description: non_empty(doc.description),
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

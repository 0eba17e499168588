use serde::{Deserialize, Serialize};

/// What went wrong while analyzing a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// The file could not be read.
    Read,
    /// The file could not be parsed; it contributes no component.
    Parse,
    /// The props provider failed; the component is kept without props.
    Props,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Read => "read",
            DiagnosticKind::Parse => "parse",
            DiagnosticKind::Props => "props",
        }
    }
}

/// A file-scoped failure that was recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file_path: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        file_path: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            kind,
            message: message.into(),
        }
    }
}

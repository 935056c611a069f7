//! Diagnostics attached to a review document.

use serde::{Deserialize, Serialize};

/// Severity of a [`CodeDiagnostic`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
    Fatal,
}

/// A message anchored to a definition of the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDiagnostic {
    /// Stable code, e.g. `AV0002`.
    pub diagnostic_id: String,
    /// Line id of the definition the diagnostic is about.
    pub target_id: String,
    pub text: String,
    pub level: DiagnosticLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link_uri: Option<String>,
}

impl CodeDiagnostic {
    pub fn new(
        diagnostic_id: impl Into<String>,
        target_id: impl Into<String>,
        text: impl Into<String>,
        level: DiagnosticLevel,
    ) -> Self {
        Self {
            diagnostic_id: diagnostic_id.into(),
            target_id: target_id.into(),
            text: text.into(),
            level,
            help_link_uri: None,
        }
    }

    pub fn info(id: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, target, text, DiagnosticLevel::Info)
    }

    pub fn warning(id: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, target, text, DiagnosticLevel::Warning)
    }

    pub fn error(id: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, target, text, DiagnosticLevel::Error)
    }

    /// Set the help link.
    pub fn with_help_link(mut self, uri: impl Into<String>) -> Self {
        self.help_link_uri = Some(uri.into());
        self
    }
}

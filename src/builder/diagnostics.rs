//! Diagnostics: build warnings attached to the review document.
//!
//! Front ends hand their own diagnostics to the document builder; the
//! builder adds the ones raised while assembling the document.

use crate::review::{CodeDiagnostic, DiagnosticLevel};

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes raised by the builder.
///
/// ## Code Ranges
///
/// - **AV0001-AV0099**: Document structure
/// - **AV0100-AV0199**: References
pub mod codes {
    /// A group was still open when the document ended.
    pub const UNCLOSED_CONTEXT: &str = "AV0001";

    /// A type reference could not be linked to any definition.
    pub const UNRESOLVED_REFERENCE: &str = "AV0101";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a build.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<CodeDiagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: CodeDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = CodeDiagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Add a warning for a group force-closed at the end of the document.
    pub fn unclosed_context(&mut self, target: &str) {
        self.add(CodeDiagnostic::warning(
            codes::UNCLOSED_CONTEXT,
            target,
            format!("'{target}' was not closed; closed at end of document"),
        ));
    }

    /// Add an info diagnostic for a reference left unlinked.
    pub fn unresolved_reference(&mut self, target: &str, name: &str) {
        self.add(CodeDiagnostic::info(
            codes::UNRESOLVED_REFERENCE,
            target,
            format!("type '{name}' is not defined in this package"),
        ));
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[CodeDiagnostic] {
        &self.diagnostics
    }

    /// Get diagnostics anchored to one line id.
    pub fn diagnostics_for_target(&self, target: &str) -> Vec<&CodeDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.target_id == target)
            .collect()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .count()
    }

    /// Check if there are any errors (fatal included).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level >= DiagnosticLevel::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take the collected diagnostics.
    pub fn into_vec(self) -> Vec<CodeDiagnostic> {
        self.diagnostics
    }
}

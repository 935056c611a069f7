//! Error types for document builds.

use thiserror::Error;

/// Errors that abort a document build.
///
/// Resolution misses (a type reference nobody declares) are not errors: they
/// are absorbed into the document as non-linked text. Everything here means
/// no document is produced at all.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two non-overload declarations produced the same definition id.
    #[error("Duplicate definition id '{id}' ({first} and {second})")]
    DuplicateDefinitionId {
        id: String,
        first: String,
        second: String,
    },

    /// Two declarations in the graph share the same front-end key.
    #[error("Duplicate declaration key: {0}")]
    DuplicateDeclaration(String),

    /// A declaration names a container that is not in the graph.
    #[error("Declaration '{declaration}' references unknown container '{container}'")]
    UnknownContainer {
        declaration: String,
        container: String,
    },

    /// Following container links from a declaration never reaches a root.
    #[error("Containment cycle through declaration '{0}'")]
    ContainmentCycle(String),

    /// A group was closed while no group was open.
    #[error("Unbalanced group: '{0}' closed with no open context")]
    UnbalancedGroup(String),

    /// A group was closed that is not the innermost open group.
    #[error("Mismatched group: expected '{expected}' to close, found '{found}'")]
    MismatchedGroup { expected: String, found: String },

    /// A declaration without a usable name.
    #[error("Declaration '{0}' is missing a name")]
    MissingName(String),

    /// The declaration graph could not be decoded.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// JSON serialization error while writing or reading a document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Create a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Create a duplicate definition id error.
    pub fn duplicate_id(
        id: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::DuplicateDefinitionId {
            id: id.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Whether this error reports a broken document (as opposed to bad input or IO).
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateDefinitionId { .. }
                | Self::DuplicateDeclaration(_)
                | Self::UnknownContainer { .. }
                | Self::ContainmentCycle(_)
                | Self::UnbalancedGroup(_)
                | Self::MismatchedGroup { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

//! Identifier newtypes.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// DECLARATION KEYS
// ============================================================================

/// Opaque key of a declaration inside a [`DeclarationGraph`](crate::model::DeclarationGraph).
///
/// Assigned by the language front end (a documentation-model DRI, a compiler
/// symbol key, ...). It only has to be unique within one graph; it never
/// appears in the rendered document.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub Arc<str>);

impl DeclId {
    /// Create a new declaration key.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeclId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DeclId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// DEFINITION IDS
// ============================================================================

/// Canonical, dot-separated identifier of a declaration in a review document.
///
/// Used as the comment anchor (`LineId`) and as the target of navigation links
/// (`NavigateToId`), e.g. `Azure.Storage.Blobs.BlobServiceClient.BlobServiceClient(System.String)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(Arc<str>);

impl DefinitionId {
    /// Create a new definition id.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append a child segment, producing `self.segment`.
    pub fn child(&self, segment: &str) -> Self {
        Self::new(format!("{}.{}", self.0, segment))
    }

    /// Convert into an owned `String` for the wire model.
    pub fn to_wire(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DefinitionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DefinitionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DefinitionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DefinitionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

//! Review document: the output of a build.
//!
//! ## Structure
//!
//! ```text
//! CodeFile
//!   ├── ReviewLines   → tree of ReviewLine, each a list of ReviewToken
//!   ├── Diagnostics   → CodeDiagnostic anchored to line ids
//!   └── Navigation    → NavigationNode outline
//! ```
//!
//! Everything here serializes to the PascalCase JSON consumed by the review
//! UI. [`render_text`] gives a plain-text approximation of what the UI shows.

mod code_file;
mod diagnostic;
mod line;
mod navigation;
mod render;
mod token;

pub use code_file::{CodeFile, Language};
pub use diagnostic::{CodeDiagnostic, DiagnosticLevel};
pub use line::ReviewLine;
pub use navigation::NavigationNode;
pub use render::{RenderOptions, render_lines, render_text};
pub use token::{PendingReference, ReviewToken, TokenKind};

//! Build pipeline tests
//!
//! End-to-end builds of declaration graphs:
//! - Document layout and token streams per language profile
//! - Grouping, hidden content and obsolete linkage
//! - Reference resolution across forward references
//! - Navigation outline
//! - Integrity failures and parallel builds

pub mod tests_document;
pub mod tests_grouping;
pub mod tests_navigation;
pub mod tests_resolution;

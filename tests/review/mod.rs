//! Review document tests
//!
//! Wire format of built documents and of declaration graph input.

pub mod tests_wire_format;

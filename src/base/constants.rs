//! Domain constants shared by the builder stages and the wire model.

/// Navigation target written by the emitter for a type reference whose
/// declaration has not been registered yet. Never survives the resolver.
pub const UNRESOLVED_TARGET: &str = "<unresolved>";

/// Line id of the dependency header line.
pub const DEPENDENCIES_LINE_ID: &str = "Dependencies";

/// Render class added to the dependency header token.
pub const DEPENDENCIES_RENDER_CLASS: &str = "dependencies";

/// Separator between the segments of a definition id.
pub const ID_SEPARATOR: char = '.';

/// Separator introducing the ordinal of colliding overload ids (`Foo(Int)#2`).
pub const OVERLOAD_ORDINAL_SEPARATOR: char = '#';

/// Prefix of the arity suffix appended to generic type segments (`Pager`1`).
pub const GENERIC_ARITY_SEPARATOR: char = '`';

/// Comment emitted inside interfaces that declare no members.
pub const EMPTY_INTERFACE_COMMENT: &str = "This interface does not declare any API.";

//! Declaration types produced by a language front end.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::base::DeclId;

// ============================================================================
// DECLARATION KINDS
// ============================================================================

/// What a declaration is. One tag for every language; emission dispatches on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Namespace,
    Class,
    Interface,
    Enum,
    Struct,
    /// An annotation/attribute *definition* (not an application).
    Annotation,
    Constructor,
    Method,
    Property,
    Field,
    Parameter,
    EnumMember,
}

impl DeclarationKind {
    /// Returns true for kinds that own a body of members.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Interface
                | DeclarationKind::Enum
                | DeclarationKind::Struct
                | DeclarationKind::Annotation
        )
    }

    /// Returns true for methods and constructors.
    pub fn is_callable(&self) -> bool {
        matches!(self, DeclarationKind::Method | DeclarationKind::Constructor)
    }

    /// Returns true for kinds rendered as a single value line.
    pub fn is_value_member(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Property | DeclarationKind::Field | DeclarationKind::EnumMember
        )
    }

    /// Returns true for kinds that are rendered as a member of a type body.
    pub fn is_member(&self) -> bool {
        self.is_callable() || self.is_value_member()
    }

    /// Lowercase tag used as a render class and navigation kind.
    pub fn render_class(&self) -> &'static str {
        match self {
            DeclarationKind::Namespace => "namespace",
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Struct => "struct",
            DeclarationKind::Annotation => "annotation",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Method => "method",
            DeclarationKind::Property => "property",
            DeclarationKind::Field => "field",
            DeclarationKind::Parameter => "parameter",
            DeclarationKind::EnumMember => "enummember",
        }
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// Declaration modifier flags.
///
/// Variant order is the canonical rendering order (visibility first), so a
/// `BTreeSet<Modifier>` always renders the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Internal,
    Private,
    Abstract,
    Open,
    Sealed,
    Static,
    Override,
    Virtual,
    Readonly,
    Const,
    Async,
}

impl Modifier {
    /// The keyword rendered for this modifier.
    pub fn keyword(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Internal => "internal",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Open => "open",
            Modifier::Sealed => "sealed",
            Modifier::Static => "static",
            Modifier::Override => "override",
            Modifier::Virtual => "virtual",
            Modifier::Readonly => "readonly",
            Modifier::Const => "const",
            Modifier::Async => "async",
        }
    }
}

// ============================================================================
// TYPE REFERENCES
// ============================================================================

/// A reference to a type as written in the declaration (`Map<String, List<Blob>>?`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Type name, possibly qualified (`System.String`).
    pub name: SmolStr,
    /// Generic arguments in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl TypeRef {
    /// Create a reference to a non-generic type.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    /// Add a generic argument.
    pub fn with_argument(mut self, argument: TypeRef) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Mark the reference as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The last dotted segment of the name (`String` for `System.String`).
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Normalized, whitespace-free form used inside definition ids.
    pub fn normalized(&self) -> String {
        let mut out = String::new();
        self.write_normalized(&mut out);
        out
    }

    fn write_normalized(&self, out: &mut String) {
        out.push_str(&self.name);
        if !self.arguments.is_empty() {
            out.push('<');
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                arg.write_normalized(out);
            }
            out.push('>');
        }
        if self.nullable {
            out.push('?');
        }
    }

    /// Parse a type as written: `Name`, `Name<A, B<C>>`, `Name?`.
    ///
    /// Returns `None` when brackets are unbalanced or a name is empty.
    pub fn parse(text: &str) -> Option<TypeRef> {
        let mut parser = TypeRefParser {
            chars: text.trim().chars().collect(),
            pos: 0,
        };
        let parsed = parser.parse_type()?;
        parser.skip_ws();
        (parser.pos == parser.chars.len()).then_some(parsed)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_char('<')?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_char('>')?;
        }
        if self.nullable {
            f.write_char('?')?;
        }
        Ok(())
    }
}

struct TypeRefParser {
    chars: Vec<char>,
    pos: usize,
}

impl TypeRefParser {
    fn skip_ws(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn parse_type(&mut self) -> Option<TypeRef> {
        self.skip_ws();
        let start = self.pos;
        while self
            .chars
            .get(self.pos)
            .is_some_and(|c| !matches!(c, '<' | '>' | ',' | '?') && !c.is_whitespace())
        {
            self.pos += 1;
        }
        if start == self.pos {
            return None;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        let mut ty = TypeRef::new(name);

        self.skip_ws();
        if self.chars.get(self.pos) == Some(&'<') {
            self.pos += 1;
            loop {
                ty.arguments.push(self.parse_type()?);
                self.skip_ws();
                match self.chars.get(self.pos) {
                    Some(',') => self.pos += 1,
                    Some('>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return None,
                }
            }
            self.skip_ws();
        }
        if self.chars.get(self.pos) == Some(&'?') {
            self.pos += 1;
            ty.nullable = true;
        }
        Some(ty)
    }
}

// ============================================================================
// GENERICS AND ATTRIBUTES
// ============================================================================

/// A generic type parameter with its bounds (`T: Comparable<T>`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParam {
    pub name: SmolStr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl GenericParam {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: TypeRef) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// An annotation application (`@JsonProperty("name")`, `[Obsolete]`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: SmolStr,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<AttributeArg>,
}

impl Attribute {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add a positional argument.
    pub fn with_arg(mut self, value: AttributeValue) -> Self {
        self.args.push(AttributeArg { name: None, value });
        self
    }

    /// Add a named argument (`key = value`).
    pub fn with_named_arg(mut self, name: impl Into<SmolStr>, value: AttributeValue) -> Self {
        self.args.push(AttributeArg {
            name: Some(name.into()),
            value,
        });
        self
    }
}

/// One annotation argument, positional when `name` is `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeArg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SmolStr>,
    pub value: AttributeValue,
}

/// Annotation argument value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum AttributeValue {
    /// A string, rendered quoted.
    String(String),
    /// A number, boolean, enum constant or other literal, rendered verbatim.
    Literal(String),
    /// A class/type literal.
    Type(TypeRef),
}

// ============================================================================
// DOCUMENTATION
// ============================================================================

/// Structured doc comment attached to a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    pub nodes: Vec<DocNode>,
}

/// One node of a structured doc comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocNode {
    Paragraph { text: String },
    Param { name: SmolStr, text: String },
    Returns { text: String },
    SeeAlso { target: String },
    Code { text: String },
}

impl Documentation {
    /// Documentation made of a single paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![DocNode::Paragraph { text: text.into() }],
        }
    }

    pub fn with_node(mut self, node: DocNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Flatten into rendered comment lines, without the comment prefix.
    ///
    /// Blank-only documentation yields no lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for node in &self.nodes {
            match node {
                DocNode::Paragraph { text } => {
                    lines.extend(text.lines().map(|l| l.trim().to_string()));
                }
                DocNode::Param { name, text } => lines.push(format!("@param {name} {}", text.trim())),
                DocNode::Returns { text } => lines.push(format!("@return {}", text.trim())),
                DocNode::SeeAlso { target } => lines.push(format!("@see {}", target.trim())),
                DocNode::Code { text } => lines.extend(text.lines().map(|l| l.trim_end().to_string())),
            }
        }
        if lines.iter().all(|l| l.trim().is_empty()) {
            return Vec::new();
        }
        // Trim blank lines at both ends.
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let first = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(0);
        lines.drain(..first);
        lines
    }
}

// ============================================================================
// DECLARATION
// ============================================================================

/// One node of the declaration graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Front-end key.
    pub id: DeclId,
    pub kind: DeclarationKind,
    pub name: SmolStr,
    /// Containing declaration; `None` for roots.
    #[serde(default, rename = "containerId", skip_serializing_if = "Option::is_none")]
    pub container: Option<DeclId>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub modifiers: BTreeSet<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generics: Vec<GenericParam>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, alias = "isDeprecated")]
    pub is_obsolete: bool,
    /// Suppressed from the default view (descendants inherit it).
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,
    /// Value type of a property/field/parameter, or return type of a method.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<TypeRef>,
    /// Default value of a parameter, constant value of a field or enum member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_language_id: Option<String>,
}

impl Declaration {
    /// Create a declaration with no container, modifiers or members.
    pub fn new(id: impl Into<DeclId>, kind: DeclarationKind, name: impl Into<SmolStr>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            container: None,
            modifiers: BTreeSet::new(),
            generics: Vec::new(),
            attributes: Vec::new(),
            is_obsolete: false,
            is_hidden: false,
            documentation: None,
            type_ref: None,
            supertypes: Vec::new(),
            value: None,
            cross_language_id: None,
        }
    }

    pub fn in_container(mut self, container: impl Into<DeclId>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_generic(mut self, generic: GenericParam) -> Self {
        self.generics.push(generic);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_doc(mut self, documentation: Documentation) -> Self {
        self.documentation = Some(documentation);
        self
    }

    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    pub fn with_supertype(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_cross_language_id(mut self, id: impl Into<String>) -> Self {
        self.cross_language_id = Some(id.into());
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

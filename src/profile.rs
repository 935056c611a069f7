//! Language profiles: everything that differs between source languages.
//!
//! A build never branches on the language itself; it reads the profile.
//! Presets cover the front ends in use today, and a profile can also be
//! loaded from JSON for languages without a preset.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::{BuildError, Result};
use crate::model::TypeRef;
use crate::review::Language;

/// Declaration keywords. `None` means the language writes no keyword there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Keywords {
    pub namespace: SmolStr,
    pub class: SmolStr,
    pub interface: SmolStr,
    #[serde(rename = "enum")]
    pub enumeration: SmolStr,
    #[serde(rename = "struct")]
    pub structure: SmolStr,
    pub annotation: SmolStr,
    pub method: Option<SmolStr>,
    pub readonly_property: Option<SmolStr>,
    pub mutable_property: Option<SmolStr>,
    pub field: Option<SmolStr>,
    /// Written in place of the name for constructors (`constructor`, `init`).
    /// Without it the containing type's name is used.
    pub constructor: Option<SmolStr>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            namespace: "namespace".into(),
            class: "class".into(),
            interface: "interface".into(),
            enumeration: "enum".into(),
            structure: "struct".into(),
            annotation: "annotation".into(),
            method: None,
            readonly_property: None,
            mutable_property: None,
            field: None,
            constructor: None,
        }
    }
}

/// Where a value or return type is written relative to the name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypePosition {
    /// `name: Type`
    #[default]
    AfterName,
    /// `Type name`
    BeforeName,
}

/// When an obsolete declaration is folded under a visible sibling.
///
/// A linked obsolete line is hidden and its `related_to_line` points at the
/// sibling. Siblings always share the container and the name and the sibling
/// must not be obsolete itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObsoleteLinkRule {
    /// Any non-obsolete sibling with the same name.
    #[default]
    NameOnly,
    /// The sibling must have a different parameter list.
    NameAndDifferentSignature,
    /// The sibling must have the identical parameter list.
    NameAndSameSignature,
    /// Obsolete declarations stay visible and unlinked.
    Disabled,
}

/// Navigation visibility switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationOptions {
    /// Show hidden declarations everywhere.
    pub always_show_hidden: bool,
    /// Show hidden declarations below these definition ids.
    pub show_hidden_under: Vec<String>,
}

/// Rendering rules of one source language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    pub language: Language,
    #[serde(default)]
    pub keywords: Keywords,
    #[serde(default)]
    pub type_position: TypePosition,
    /// Generic parameters go before the name of members (`fun <T> get()`).
    #[serde(default)]
    pub member_generics_before_name: bool,
    /// Punctuation before a return type (`:` or `->`).
    #[serde(default = "default_return_separator")]
    pub return_separator: SmolStr,
    /// Introduces the supertype list (`:` or `extends`).
    #[serde(default = "default_return_separator")]
    pub inheritance_separator: SmolStr,
    /// Render `{ get; }`/`{ get; set; }` after properties.
    #[serde(default)]
    pub property_accessors: bool,
    /// Annotations never rendered, matched with or without `annotation_suffix`.
    #[serde(default)]
    pub noise_annotations: Vec<SmolStr>,
    /// Annotations whose qualified name starts with one of these are dropped.
    #[serde(default)]
    pub noise_annotation_prefixes: Vec<SmolStr>,
    /// Suffix stripped from rendered annotation names (`Attribute`).
    #[serde(default)]
    pub annotation_suffix: Option<SmolStr>,
    #[serde(default = "default_annotation_open")]
    pub annotation_open: SmolStr,
    #[serde(default)]
    pub annotation_close: SmolStr,
    /// Annotations that mark a declaration obsolete.
    #[serde(default)]
    pub deprecation_annotations: Vec<SmolStr>,
    /// Return types that are not rendered (`Unit`, `void`).
    #[serde(default)]
    pub void_types: Vec<SmolStr>,
    /// Types never linked.
    #[serde(default)]
    pub primitive_types: Vec<SmolStr>,
    #[serde(default)]
    pub member_terminator: SmolStr,
    #[serde(default = "default_doc_prefix")]
    pub doc_comment_prefix: SmolStr,
    #[serde(default)]
    pub obsolete_link_rule: ObsoleteLinkRule,
    /// Omit a parameterless constructor when it is the type's only one.
    #[serde(default)]
    pub hide_lone_default_constructor: bool,
    /// Write a comment into interfaces without members.
    #[serde(default)]
    pub comment_empty_interfaces: bool,
    #[serde(default)]
    pub navigation: NavigationOptions,
}

fn default_return_separator() -> SmolStr {
    ":".into()
}

fn default_annotation_open() -> SmolStr {
    "@".into()
}

fn default_doc_prefix() -> SmolStr {
    "//".into()
}

fn names(list: &[&str]) -> Vec<SmolStr> {
    list.iter().map(|s| SmolStr::new(s)).collect()
}

impl LanguageProfile {
    /// Neutral profile: no method or property keywords, types after names.
    pub fn generic(language: Language) -> Self {
        Self {
            language,
            keywords: Keywords::default(),
            type_position: TypePosition::AfterName,
            member_generics_before_name: false,
            return_separator: default_return_separator(),
            inheritance_separator: default_return_separator(),
            property_accessors: false,
            noise_annotations: Vec::new(),
            noise_annotation_prefixes: Vec::new(),
            annotation_suffix: None,
            annotation_open: default_annotation_open(),
            annotation_close: SmolStr::default(),
            deprecation_annotations: names(&["Deprecated", "Obsolete"]),
            void_types: names(&["void", "Void", "Unit"]),
            primitive_types: Vec::new(),
            member_terminator: SmolStr::default(),
            doc_comment_prefix: default_doc_prefix(),
            obsolete_link_rule: ObsoleteLinkRule::NameOnly,
            hide_lone_default_constructor: false,
            comment_empty_interfaces: false,
            navigation: NavigationOptions::default(),
        }
    }

    pub fn kotlin() -> Self {
        Self {
            keywords: Keywords {
                namespace: "package".into(),
                enumeration: "enum class".into(),
                structure: "data class".into(),
                annotation: "annotation class".into(),
                method: Some("fun".into()),
                readonly_property: Some("val".into()),
                mutable_property: Some("var".into()),
                field: Some("val".into()),
                constructor: Some("constructor".into()),
                ..Keywords::default()
            },
            member_generics_before_name: true,
            noise_annotations: names(&["Suppress", "JvmStatic", "JvmOverloads", "JvmName", "JvmField"]),
            noise_annotation_prefixes: names(&["kotlin.internal."]),
            deprecation_annotations: names(&["Deprecated", "kotlin.Deprecated"]),
            void_types: names(&["Unit", "kotlin.Unit"]),
            primitive_types: names(&[
                "Any", "Boolean", "Byte", "Char", "Double", "Float", "Int", "Long", "Nothing",
                "Short", "String", "Unit",
            ]),
            hide_lone_default_constructor: true,
            comment_empty_interfaces: true,
            ..Self::generic(Language::Kotlin)
        }
    }

    pub fn csharp() -> Self {
        Self {
            keywords: Keywords {
                annotation: "class".into(),
                ..Keywords::default()
            },
            type_position: TypePosition::BeforeName,
            property_accessors: true,
            noise_annotations: names(&[
                "DebuggerStepThroughAttribute",
                "AsyncStateMachineAttribute",
                "IteratorStateMachineAttribute",
                "DefaultMemberAttribute",
                "AsyncIteratorStateMachineAttribute",
                "EditorBrowsableAttribute",
                "NullableAttribute",
                "NullableContextAttribute",
            ]),
            noise_annotation_prefixes: names(&["System.Runtime.CompilerServices."]),
            annotation_suffix: Some("Attribute".into()),
            annotation_open: "[".into(),
            annotation_close: "]".into(),
            deprecation_annotations: names(&["Obsolete", "ObsoleteAttribute"]),
            void_types: names(&["void", "System.Void"]),
            primitive_types: names(&[
                "bool", "byte", "sbyte", "char", "decimal", "double", "float", "int", "uint",
                "nint", "nuint", "long", "ulong", "short", "ushort", "object", "string", "void",
                "dynamic",
            ]),
            member_terminator: ";".into(),
            doc_comment_prefix: "///".into(),
            ..Self::generic(Language::CSharp)
        }
    }

    pub fn swift() -> Self {
        Self {
            keywords: Keywords {
                namespace: "module".into(),
                interface: "protocol".into(),
                method: Some("func".into()),
                readonly_property: Some("let".into()),
                mutable_property: Some("var".into()),
                field: Some("let".into()),
                constructor: Some("init".into()),
                ..Keywords::default()
            },
            return_separator: "->".into(),
            deprecation_annotations: names(&["deprecated"]),
            void_types: names(&["Void", "()"]),
            primitive_types: names(&[
                "Bool", "Character", "Double", "Float", "Int", "Int8", "Int16", "Int32", "Int64",
                "String", "UInt", "UInt8", "UInt16", "UInt32", "UInt64", "Void", "Any",
            ]),
            doc_comment_prefix: "///".into(),
            ..Self::generic(Language::Swift)
        }
    }

    pub fn typespec() -> Self {
        Self {
            keywords: Keywords {
                class: "model".into(),
                structure: "model".into(),
                annotation: "dec".into(),
                method: Some("op".into()),
                ..Keywords::default()
            },
            inheritance_separator: "extends".into(),
            deprecation_annotations: names(&["deprecated"]),
            void_types: names(&["void"]),
            primitive_types: names(&[
                "boolean", "bytes", "decimal", "duration", "float", "float32", "float64",
                "int8", "int16", "int32", "int64", "integer", "never", "numeric", "offsetDateTime",
                "plainDate", "plainTime", "safeint", "string", "uint8", "uint16", "uint32",
                "uint64", "unknown", "url", "utcDateTime", "void",
            ]),
            member_terminator: ";".into(),
            ..Self::generic(Language::TypeSpec)
        }
    }

    /// Load a profile from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BuildError::malformed(format!("profile: {e}")))
    }

    /// Whether references to this type are left unlinked.
    pub fn is_primitive(&self, ty: &TypeRef) -> bool {
        self.primitive_types
            .iter()
            .any(|p| p == &ty.name || p == ty.simple_name())
    }

    /// Whether a return type is omitted.
    pub fn is_void(&self, ty: &TypeRef) -> bool {
        ty.arguments.is_empty()
            && self
                .void_types
                .iter()
                .any(|v| v == &ty.name || v == ty.simple_name())
    }

    /// Whether an annotation is filtered out of the rendering.
    pub fn is_noise_annotation(&self, name: &str) -> bool {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let stripped = self.strip_annotation_suffix(simple);
        self.noise_annotations
            .iter()
            .any(|n| n == name || n == simple || self.strip_annotation_suffix(n) == stripped)
            || self
                .noise_annotation_prefixes
                .iter()
                .any(|p| name.starts_with(p.as_str()))
    }

    /// Whether an annotation marks its declaration obsolete.
    pub fn is_deprecation_annotation(&self, name: &str) -> bool {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let stripped = self.strip_annotation_suffix(simple);
        self.deprecation_annotations
            .iter()
            .any(|d| d == name || self.strip_annotation_suffix(d) == stripped)
    }

    /// Drop the configured suffix, unless that would leave nothing.
    pub fn strip_annotation_suffix<'a>(&self, name: &'a str) -> &'a str {
        match &self.annotation_suffix {
            Some(suffix) => match name.strip_suffix(suffix.as_str()) {
                Some(stripped) if !stripped.is_empty() => stripped,
                _ => name,
            },
            None => name,
        }
    }

    /// Whether hidden content below `id` (or anywhere) stays visible in navigation.
    pub fn shows_hidden_under(&self, id: &str) -> bool {
        self.navigation.always_show_hidden
            || self.navigation.show_hidden_under.iter().any(|s| s == id)
    }
}

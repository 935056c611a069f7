//! The review document and its JSON encoding.

use std::fs;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::diagnostic::CodeDiagnostic;
use super::line::ReviewLine;
use super::navigation::NavigationNode;
use crate::error::Result;

/// Source language of a review document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C++")]
    Cpp,
    #[serde(rename = "C#")]
    CSharp,
    Go,
    Java,
    JavaScript,
    Json,
    Kotlin,
    Python,
    Rust,
    Swift,
    TypeSpec,
}

impl Language {
    /// Display name, identical to the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Go => "Go",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::Json => "Json",
            Language::Kotlin => "Kotlin",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Swift => "Swift",
            Language::TypeSpec => "TypeSpec",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete API review document for one package revision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeFile {
    pub package_name: String,
    pub package_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_version: Option<String>,
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_language_package_id: Option<String>,
    pub review_lines: Vec<ReviewLine>,
    #[serde(default)]
    pub diagnostics: Vec<CodeDiagnostic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Vec<NavigationNode>>,
}

impl CodeFile {
    /// Create an empty document.
    pub fn new(
        package_name: impl Into<String>,
        package_version: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            package_version: package_version.into(),
            parser_version: None,
            language,
            cross_language_package_id: None,
            review_lines: Vec::new(),
            diagnostics: Vec::new(),
            navigation: None,
        }
    }

    /// Every line of the document, depth first.
    pub fn all_lines(&self) -> Vec<&ReviewLine> {
        self.review_lines.iter().flat_map(|l| l.walk()).collect()
    }

    /// Find the line declaring `line_id`.
    pub fn find_line(&self, line_id: &str) -> Option<&ReviewLine> {
        self.all_lines()
            .into_iter()
            .find(|l| l.line_id.as_deref() == Some(line_id))
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write JSON to a writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read JSON from a reader.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    }

    /// Write JSON to a file, creating or truncating it.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = fs::File::create(path.as_ref())?;
        self.write_to(file)?;
        tracing::debug!(path = %path.as_ref().display(), "review document saved");
        Ok(())
    }

    /// Read JSON from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = fs::File::open(path.as_ref())?;
        Self::read_from(file)
    }
}

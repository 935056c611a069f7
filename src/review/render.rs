//! Plain-text rendering of a review document.

use super::code_file::CodeFile;
use super::line::ReviewLine;

/// Text rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Number of spaces per nesting level (or tab width if using tabs)
    pub tab_size: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
    /// Render hidden lines as well
    pub include_hidden: bool,
    /// Render documentation tokens and lines
    pub include_documentation: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
            include_hidden: false,
            include_documentation: true,
        }
    }
}

impl RenderOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size * level)
        } else {
            "\t".repeat(level)
        }
    }
}

/// Render a whole document, one text line per visible review line.
pub fn render_text(code_file: &CodeFile, options: &RenderOptions) -> String {
    render_lines(&code_file.review_lines, options)
}

/// Render a slice of review lines starting at nesting level zero.
pub fn render_lines(lines: &[ReviewLine], options: &RenderOptions) -> String {
    let mut out = String::new();
    for line in lines {
        render_line(line, 0, options, &mut out);
    }
    out
}

fn render_line(line: &ReviewLine, level: usize, options: &RenderOptions, out: &mut String) {
    if line.is_hidden && !options.include_hidden {
        return;
    }

    let tokens: Vec<_> = line
        .tokens
        .iter()
        .filter(|t| options.include_documentation || !t.is_documentation)
        .collect();

    // A documentation-only line disappears entirely when docs are off.
    let skip_self = tokens.is_empty() && !line.tokens.is_empty();
    if !skip_self {
        if !tokens.is_empty() {
            out.push_str(&options.indent(level));
        }
        for (i, token) in tokens.iter().enumerate() {
            out.push_str(&token.value);
            if token.has_suffix_space && i + 1 < tokens.len() {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    for child in &line.children {
        render_line(child, level + 1, options, out);
    }
}

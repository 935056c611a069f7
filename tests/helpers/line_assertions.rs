//! Assertions over built review documents.

use apiview::base::constants::UNRESOLVED_TARGET;
use apiview::review::{RenderOptions, render_text};
use apiview::{CodeFile, ReviewLine};
use std::collections::HashSet;

/// Find a line by id, panicking with the known ids on a miss.
pub fn line<'a>(file: &'a CodeFile, id: &str) -> &'a ReviewLine {
    file.find_line(id).unwrap_or_else(|| {
        let known: Vec<_> = file
            .all_lines()
            .into_iter()
            .filter_map(|l| l.line_id.as_deref())
            .collect();
        panic!("no line '{id}', known ids: {known:?}")
    })
}

/// Values of a line's tokens.
pub fn token_values(line: &ReviewLine) -> Vec<&str> {
    line.tokens.iter().map(|t| t.value.as_str()).collect()
}

/// Lines attached to `id` through `related_to_line`.
pub fn related_lines<'a>(file: &'a CodeFile, id: &str) -> Vec<&'a ReviewLine> {
    file.all_lines()
        .into_iter()
        .filter(|l| l.related_to_line.as_deref() == Some(id))
        .collect()
}

/// Default text rendering.
pub fn rendered(file: &CodeFile) -> String {
    render_text(file, &RenderOptions::default())
}

pub fn assert_no_placeholders(file: &CodeFile) {
    for line in file.all_lines() {
        for token in &line.tokens {
            assert_ne!(
                token.navigate_to_id.as_deref(),
                Some(UNRESOLVED_TARGET),
                "placeholder left on token '{}'",
                token.value
            );
        }
    }
}

pub fn assert_unique_line_ids(file: &CodeFile) {
    let mut seen = HashSet::new();
    for id in file.all_lines().into_iter().filter_map(|l| l.line_id.as_deref()) {
        assert!(seen.insert(id), "line id '{id}' appears twice");
    }
}

/// Every navigation target must name a line of the document.
pub fn assert_links_land_on_lines(file: &CodeFile) {
    let ids: HashSet<_> = file
        .all_lines()
        .into_iter()
        .filter_map(|l| l.line_id.as_deref())
        .collect();
    for line in file.all_lines() {
        for target in line.tokens.iter().filter_map(|t| t.navigate_to_id.as_deref()) {
            assert!(ids.contains(target), "link to '{target}' has no line");
        }
    }
}

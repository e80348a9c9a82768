use regex::Regex;
use std::sync::OnceLock;

use super::types::{Span, TableRegion};

/// Two or more consecutive lines that each begin and end with a pipe.
const TABLE_PATTERN: &str = r"\|.*\|(?:\r?\n\|.*\|)+";

fn table_regex() -> &'static Regex {
    static TABLE_REGEX: OnceLock<Regex> = OnceLock::new();
    TABLE_REGEX.get_or_init(|| Regex::new(TABLE_PATTERN).expect("Invalid table regex"))
}

/// Finds every pipe-table region in `content`, first to last.
///
/// Regions never overlap and never span a blank line. Trailing whitespace
/// after a line's final pipe ends the region at that line.
pub fn locate_tables(content: &str) -> Vec<TableRegion<'_>> {
    table_regex()
        .find_iter(content)
        .map(|m| TableRegion {
            text: m.as_str(),
            span: Span {
                start: m.start(),
                end: m.end(),
            },
        })
        .collect()
}

/// Returns the region at `index`, re-located against the current content.
pub fn locate_table(content: &str, index: usize) -> Option<TableRegion<'_>> {
    table_regex()
        .find_iter(content)
        .nth(index)
        .map(|m| TableRegion {
            text: m.as_str(),
            span: Span {
                start: m.start(),
                end: m.end(),
            },
        })
}

//! Splits a markdown file at its ATX headings and collects the tables of
//! each section under that section's title.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::TableData;
use crate::table::{Span, locate_tables, parse_table};

fn heading_regex() -> &'static Regex {
    static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    HEADING_REGEX
        .get_or_init(|| Regex::new(r"^#{1,6}\s+(.+)$").expect("Invalid heading regex"))
}

/// A run of lines from one heading up to the next (or file start/end).
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    /// Heading text without markup; `None` for content before the first heading.
    pub title: Option<String>,
    /// Byte span of the section, heading line included.
    pub span: Span,
    /// The section's text.
    pub text: &'a str,
}

/// Splits `content` into sections at lines like `## Title`.
///
/// Content before the first heading forms an anonymous section. A file
/// without headings is a single anonymous section.
pub fn split_sections(content: &str) -> Vec<Section<'_>> {
    let mut sections = Vec::new();
    let mut current: Option<(Option<String>, usize)> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\r', '\n']);
        if let Some(caps) = heading_regex().captures(bare) {
            if let Some((title, start)) = current.take() {
                sections.push(section(content, title, start, offset));
            }
            current = Some((Some(caps[1].trim().to_string()), offset));
        } else if current.is_none() {
            current = Some((None, offset));
        }
        offset += line.len();
    }

    if let Some((title, start)) = current {
        sections.push(section(content, title, start, offset));
    }

    sections
}

fn section(content: &str, title: Option<String>, start: usize, end: usize) -> Section<'_> {
    Section {
        title,
        span: Span { start, end },
        text: &content[start..end],
    }
}

/// Titles the `position`-th table (0-based) of a section.
fn part_title(title: &str, position: usize) -> String {
    if position == 0 {
        title.to_string()
    } else {
        format!("{title} (Part {})", position + 1)
    }
}

/// Collects every table in `content`, titled by its section.
///
/// Tables in an anonymous section are titled `fallback_title` (the file
/// stem). Each [`TableData::table_index`] is the table's position among all
/// regions in the whole file.
pub fn extract_tables(content: &str, fallback_title: &str) -> Vec<TableData> {
    let file_regions = locate_tables(content);
    let mut tables = Vec::new();

    for section in split_sections(content) {
        let title = section.title.as_deref().unwrap_or(fallback_title);
        let mut position = 0;

        for region in locate_tables(section.text) {
            let start = section.span.start + region.span.start;
            let Some(table_index) = file_regions.iter().position(|r| r.span.start == start) else {
                log::debug!("table at byte {start} crosses a heading, skipping");
                continue;
            };
            let Some(table) = parse_table(region.text) else {
                continue;
            };
            tables.push(TableData {
                title: part_title(title, position),
                table_index,
                table,
            });
            position += 1;
        }
    }

    tables
}

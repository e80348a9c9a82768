use super::classify::{LineRole, TableLineClassifier, is_progress_marker};
use super::locate::locate_table;
use super::types::Row;
use super::{PROGRESS_LABEL, UNCHECKED};

/// Cell spliced into separator lines when the progress column is added.
const SEPARATOR_CELL: &str = "----";

/// Patches the table at `table_index` inside `content`.
///
/// The table is re-located against `content` on every call. Bytes outside
/// the table's span are returned untouched. `new_rows` is aligned with the
/// parsed row list: one entry per data row or custom separator, in order.
///
/// - Without a progress column, one is added to every line: the label on the
///   header, dashes on separators, and on data rows the marker from
///   `new_rows` (or [`UNCHECKED`]).
/// - With a progress column, only data rows that have an entry in `new_rows`
///   change, and only inside their last cell, keeping its padding.
///
/// Requested values other than [`UNCHECKED`] and `[x]` are written as
/// [`UNCHECKED`]. Each line keeps its own line break. An index past the last
/// table returns `content` unchanged. Lines that do not fit the expected
/// shape are passed through as they are.
pub fn rewrite_table(content: &str, table_index: usize, new_rows: Option<&[Row]>) -> String {
    let Some(region) = locate_table(content, table_index) else {
        log::debug!("no table at index {table_index}, leaving content unchanged");
        return content.to_string();
    };

    let classifier = TableLineClassifier;
    let lines: Vec<(&str, &str)> = region.lines_with_endings().collect();
    let has_progress_column = lines
        .first()
        .is_some_and(|(header, _)| classifier.has_progress_column(header));

    let mut cursor = 0;
    let mut table_text = String::with_capacity(region.text.len() + lines.len() * 12);

    for (index, (line, ending)) in lines.into_iter().enumerate() {
        let role = classifier.classify(index, line);
        let update = if role.is_row() {
            let update = new_rows.and_then(|rows| rows.get(cursor));
            cursor += 1;
            update
        } else {
            None
        };
        let progress = update.and_then(Row::progress).map(progress_marker);

        let patched = if has_progress_column {
            match (role, progress) {
                (LineRole::Data, Some(progress)) => replace_last_cell(line, progress),
                _ => None,
            }
        } else {
            match role {
                LineRole::Header => insert_last_cell(line, PROGRESS_LABEL, " "),
                LineRole::PrimarySeparator | LineRole::CustomSeparator => {
                    insert_last_cell(line, SEPARATOR_CELL, " ")
                }
                LineRole::Data => insert_last_cell(line, progress.unwrap_or(UNCHECKED), "  "),
            }
        };

        table_text.push_str(patched.as_deref().unwrap_or(line));
        table_text.push_str(ending);
    }

    let mut result = String::with_capacity(content.len() + table_text.len() - region.text.len());
    result.push_str(&content[..region.span.start]);
    result.push_str(&table_text);
    result.push_str(&content[region.span.end..]);
    result
}

/// A requested progress value as it may be written into a cell.
fn progress_marker(value: &str) -> &str {
    let value = value.trim();
    if is_progress_marker(value) {
        value
    } else {
        UNCHECKED
    }
}

/// Adds a new last cell just before the line's final pipe.
///
/// `"| a |"` with `value = "b"` becomes `"| a | b |"`.
fn insert_last_cell(line: &str, value: &str, trailing: &str) -> Option<String> {
    let close = line.rfind('|')?;
    Some(format!(
        "{}| {value}{trailing}|{}",
        &line[..close],
        &line[close + 1..]
    ))
}

/// Replaces the text of the last cell, keeping the whitespace around it.
///
/// A blank cell gets a single space on either side.
fn replace_last_cell(line: &str, value: &str) -> Option<String> {
    let close = line.rfind('|')?;
    let open = line[..close].rfind('|')?;
    let cell = &line[open + 1..close];

    let (leading, trailing) = if cell.trim().is_empty() {
        (" ", " ")
    } else {
        let leading = &cell[..cell.len() - cell.trim_start().len()];
        let trailing = &cell[cell.trim_end().len()..];
        (leading, trailing)
    };

    Some(format!(
        "{}{leading}{value}{trailing}{}",
        &line[..=open],
        &line[close..]
    ))
}

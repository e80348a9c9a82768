use super::classify::{
    LineRole, TableLineClassifier, is_progress_marker, is_separator_cells, split_cells,
};
use super::locate::locate_table;
use super::types::{ParsedTable, Row};
use super::{PROGRESS_LABEL, UNCHECKED};

fn is_pipe_row(line: &str) -> bool {
    line.starts_with('|') && line.ends_with('|')
}

/// Parses one table region into a header and row list.
///
/// Returns `None` when the header line is not a pipe row or when no row
/// follows the header. Rows are padded or truncated to the header width, and
/// the progress column is either recognised or appended (see
/// [`reconcile_progress`]).
pub fn parse_table(text: &str) -> Option<ParsedTable> {
    let lines: Vec<&str> = text.trim().split('\n').map(str::trim).collect();
    let header_line = lines.first()?;
    if !is_pipe_row(header_line) {
        return None;
    }

    let header: Vec<String> = split_cells(header_line)
        .into_iter()
        .map(str::to_string)
        .collect();

    let classifier = TableLineClassifier;
    let data_start = match lines.get(1) {
        Some(line) if classifier.classify(1, line) == LineRole::PrimarySeparator => 2,
        _ => 1,
    };

    let mut rows = Vec::new();
    for line in lines.iter().skip(data_start) {
        if !is_pipe_row(line) {
            continue;
        }
        let cells = split_cells(line);
        if cells.is_empty() {
            continue;
        }
        if is_separator_cells(&cells) {
            rows.push(Row::Separator);
        } else {
            let mut cells: Vec<String> = cells.into_iter().map(str::to_string).collect();
            cells.resize(header.len(), String::new());
            rows.push(Row::Data(cells));
        }
    }

    if rows.is_empty() {
        return None;
    }

    Some(reconcile_progress(header, rows))
}

/// Locates the first table in `content` and parses it.
pub fn parse_first_table(content: &str) -> Option<ParsedTable> {
    locate_table(content, 0).and_then(|region| parse_table(region.text))
}

/// Decides which column tracks progress and canonicalises its cells.
///
/// The last column counts as the progress column when at least half of the
/// data rows (`marked * 2 >= total`, so an exact half qualifies) already hold
/// a progress marker there, whatever the header says. Otherwise a new
/// column labelled [`PROGRESS_LABEL`] is appended with [`UNCHECKED`] in every
/// data row. Tables close to the 50% boundary can land on either side.
fn reconcile_progress(mut header: Vec<String>, mut rows: Vec<Row>) -> ParsedTable {
    let total = rows.iter().filter(|row| !row.is_separator()).count();
    if total == 0 {
        return ParsedTable { header, rows };
    }

    let is_progress_column = header.len().checked_sub(1).is_some_and(|last| {
        let marked = rows
            .iter()
            .filter_map(Row::cells)
            .filter(|cells| cells.get(last).is_some_and(|c| is_progress_marker(c.trim())))
            .count();
        marked * 2 >= total
    });

    if is_progress_column {
        for row in &mut rows {
            if let Row::Data(cells) = row
                && let Some(progress) = cells.last_mut()
                && !is_progress_marker(progress)
            {
                *progress = UNCHECKED.to_string();
            }
        }
    } else {
        header.push(PROGRESS_LABEL.to_string());
        for row in &mut rows {
            if let Row::Data(cells) = row {
                cells.push(UNCHECKED.to_string());
            }
        }
    }

    ParsedTable { header, rows }
}

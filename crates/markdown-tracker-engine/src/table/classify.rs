use super::{CHECKED, PROGRESS_LABEL, UNCHECKED};

/// Role of a single line within a table region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// First line of the region; holds the column names.
    Header,
    /// Second line when it contains `---`.
    PrimarySeparator,
    /// A later line whose cells are all dashes; divides row groups.
    CustomSeparator,
    /// Everything else.
    Data,
}

impl LineRole {
    /// Whether the line occupies a slot in a table's row list.
    ///
    /// Header and primary separator do not; data rows and custom separators
    /// do, which keeps row indices aligned with the parsed row list.
    pub fn is_row(self) -> bool {
        matches!(self, LineRole::Data | LineRole::CustomSeparator)
    }
}

/// Classifies table lines by position and content only.
pub struct TableLineClassifier;

impl TableLineClassifier {
    /// Classifies the line at `index` (0-based) within its region.
    pub fn classify(&self, index: usize, line: &str) -> LineRole {
        if index == 0 {
            LineRole::Header
        } else if index == 1 && line.contains("---") {
            LineRole::PrimarySeparator
        } else if is_dash_row(&split_cells(line)) {
            LineRole::CustomSeparator
        } else {
            LineRole::Data
        }
    }

    /// Whether the region already carries a progress column, judged by the
    /// header line's last cell.
    pub fn has_progress_column(&self, header_line: &str) -> bool {
        split_cells(header_line).last() == Some(&PROGRESS_LABEL)
    }
}

/// Splits a pipe row into trimmed cells, dropping the two boundary fields.
///
/// `"| a | b |"` yields `["a", "b"]`. Lines with fewer than two pipes yield
/// no cells.
pub fn split_cells(line: &str) -> Vec<&str> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1]
        .iter()
        .map(|cell| cell.trim())
        .collect()
}

/// True for `[ ]` and `[x]`.
pub fn is_progress_marker(value: &str) -> bool {
    value == UNCHECKED || value == CHECKED
}

fn is_dashes(value: &str) -> bool {
    value.chars().all(|c| c == '-')
}

/// Every cell non-empty and made of dashes only.
fn is_dash_row(cells: &[&str]) -> bool {
    !cells.is_empty() && cells.iter().all(|cell| !cell.is_empty() && is_dashes(cell))
}

/// Whether parsed cells stand for a separator rather than data.
///
/// True when every cell is blank, dashes only, or a bare progress marker.
pub fn is_separator_cells<S: AsRef<str>>(cells: &[S]) -> bool {
    cells.iter().all(|cell| {
        let cell = cell.as_ref().trim();
        is_dashes(cell) || is_progress_marker(cell)
    })
}

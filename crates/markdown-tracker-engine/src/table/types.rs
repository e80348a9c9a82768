use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into a content string.
///
/// Spans are only meaningful against the exact string they were computed
/// from; any rewrite of that string invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

/// A pipe-table region found inside a larger content string.
///
/// Borrows the content it was located in, so a region cannot outlive a
/// mutation of that content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion<'a> {
    /// Raw table text, exactly `&content[span.start..span.end]`.
    pub text: &'a str,
    /// Byte span of the table within the content.
    pub span: Span,
}

impl<'a> TableRegion<'a> {
    /// Each line of the region paired with the break that ended it
    /// (`"\r\n"`, `"\n"`, or `""` for the last line).
    pub fn lines_with_endings(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.text.split_inclusive('\n').map(|line| {
            if let Some(bare) = line.strip_suffix("\r\n") {
                (bare, "\r\n")
            } else if let Some(bare) = line.strip_suffix('\n') {
                (bare, "\n")
            } else {
                (line, "")
            }
        })
    }
}

/// One row of a parsed table, in on-disk order.
///
/// On the wire a data row is an array of cells and a separator is an empty
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum Row {
    /// A row carrying cell values; after parsing it has exactly as many cells
    /// as the header and its last cell is a canonical progress marker.
    Data(Vec<String>),
    /// A divider line that carries no data.
    Separator,
}

impl Row {
    /// Cell values of a data row, `None` for separators.
    pub fn cells(&self) -> Option<&[String]> {
        match self {
            Row::Data(cells) => Some(cells),
            Row::Separator => None,
        }
    }

    /// Last cell of a data row, which holds the progress marker.
    pub fn progress(&self) -> Option<&str> {
        self.cells()
            .and_then(|cells| cells.last())
            .map(String::as_str)
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Row::Separator)
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        if cells.is_empty() {
            Row::Separator
        } else {
            Row::Data(cells)
        }
    }
}

impl From<Row> for Vec<String> {
    fn from(row: Row) -> Self {
        match row {
            Row::Data(cells) => cells,
            Row::Separator => Vec::new(),
        }
    }
}

/// Structured view of one pipe table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Column names; the last one is the progress column.
    pub header: Vec<String>,
    /// Rows in on-disk order, separators included.
    pub rows: Vec<Row>,
}

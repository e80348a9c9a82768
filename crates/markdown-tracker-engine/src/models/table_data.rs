use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};

use crate::table::{ParsedTable, Row};

/// A parsed table together with where it sits in its file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableData {
    /// Nearest preceding heading, or the file stem, plus `" (Part N)"` for
    /// the second and later tables of a section.
    pub title: String,
    /// Position among all table regions in the file (0-based); the index a
    /// [`TableUpdate`] must use.
    pub table_index: usize,
    #[serde(flatten)]
    pub table: ParsedTable,
}

/// Every table found in one markdown file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// Path relative to the scanned root, `/`-separated.
    pub file_path: RelativePathBuf,
    pub tables: Vec<TableData>,
}

/// New row states for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    pub file_path: RelativePathBuf,
    pub table_index: usize,
    /// Aligned with [`ParsedTable::rows`]: separators are empty arrays and
    /// each data row's last cell is its new progress marker.
    pub new_rows: Vec<Row>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveRequest {
    pub updates: Vec<TableUpdate>,
}

/// Failure to process one file during a batch write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileError {
    pub file: String,
    pub error: String,
}

/// Outcome of a batch write.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    /// False as soon as any file failed.
    pub success: bool,
    pub updated_files: Vec<String>,
    pub errors: Vec<FileError>,
}

impl SaveReport {
    /// Human-readable summary, one line per failed file.
    pub fn message(&self) -> String {
        if self.success {
            return format!("Saved {} file(s)", self.updated_files.len());
        }
        let mut message = String::from("Save failed:");
        for err in &self.errors {
            message.push_str(&format!("\n  {}: {}", err.file, err.error));
        }
        message
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

impl From<&SaveReport> for SaveResponse {
    fn from(report: &SaveReport) -> Self {
        Self {
            success: report.success,
            message: report.message(),
        }
    }
}

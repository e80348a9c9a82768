//! Applies table updates to files on disk.
//!
//! Every write normalises the whole file: each table in it is rewritten, so
//! tables nobody touched still gain a progress column.

use relative_path::{RelativePath, RelativePathBuf};
use std::collections::HashMap;
use std::path::Path;

use crate::io::{
    IoError, ScanOptions, read_file, relative_to_root, scan_markdown_files, write_file,
};
use crate::models::{FileError, SaveReport, TableUpdate};
use crate::table::{Row, locate_table, rewrite_table};

/// Rewrites every table in `content`, feeding each the rows registered for
/// its index.
///
/// Tables are re-located before each step, so the loop stops at the count of
/// the content as it stands after the previous rewrite.
pub fn apply_table_updates(content: &str, updates: &HashMap<usize, &[Row]>) -> String {
    let mut content = content.to_string();
    let mut index = 0;
    while locate_table(&content, index).is_some() {
        log::debug!("normalising table {index}");
        content = rewrite_table(&content, index, updates.get(&index).copied());
        index += 1;
    }

    for ignored in updates.keys().filter(|key| **key >= index) {
        log::debug!("update for table {ignored} ignored, file has {index} table(s)");
    }
    content
}

fn update_file(
    path: &RelativePath,
    root: &Path,
    updates: &HashMap<usize, &[Row]>,
) -> Result<(), IoError> {
    let content = read_file(path, root)?;
    let updated = apply_table_updates(&content, updates);
    write_file(path, root, &updated)
}

/// Groups updates by file, then reads and writes each file once.
///
/// Files are processed in order of first appearance. When one table index
/// appears more than once for a file the last update wins. A failing file is
/// reported and the rest are still written.
pub fn write_updates(updates: &[TableUpdate], root: &Path) -> SaveReport {
    let mut files: Vec<(RelativePathBuf, HashMap<usize, &[Row]>)> = Vec::new();
    for update in updates {
        let path = update.file_path.normalize();
        let position = match files.iter().position(|(existing, _)| *existing == path) {
            Some(position) => position,
            None => {
                files.push((path, HashMap::new()));
                files.len() - 1
            }
        };
        files[position]
            .1
            .insert(update.table_index, update.new_rows.as_slice());
    }

    let mut report = SaveReport {
        success: true,
        ..SaveReport::default()
    };
    for (path, table_updates) in &files {
        record(&mut report, path, update_file(path, root, table_updates));
    }
    report
}

fn record(report: &mut SaveReport, path: &RelativePath, outcome: Result<(), IoError>) {
    match outcome {
        Ok(()) => {
            log::info!("saved {path}");
            report.updated_files.push(path.to_string());
        }
        Err(err) => {
            log::warn!("failed to save {path}: {err}");
            report.success = false;
            report.errors.push(FileError {
                file: path.to_string(),
                error: err.to_string(),
            });
        }
    }
}

/// Applies a single update to its file. Other tables in the file are left
/// as they are.
pub fn write_update(update: &TableUpdate, root: &Path) -> Result<(), IoError> {
    let content = read_file(&update.file_path, root)?;
    let updated = rewrite_table(&content, update.table_index, Some(update.new_rows.as_slice()));
    write_file(&update.file_path, root, &updated)
}

/// Adds a progress column to every table in a file that lacks one.
pub fn normalize_file(path: &RelativePath, root: &Path) -> Result<(), IoError> {
    update_file(path, root, &HashMap::new())
}

/// Runs [`normalize_file`] over every markdown file below `root`.
pub fn normalize_directory(root: &Path, options: &ScanOptions) -> Result<SaveReport, IoError> {
    let mut report = SaveReport {
        success: true,
        ..SaveReport::default()
    };
    for file in scan_markdown_files(root, options)? {
        if let Some(path) = relative_to_root(&file, root) {
            let outcome = normalize_file(&path, root);
            record(&mut report, &path, outcome);
        }
    }
    Ok(report)
}

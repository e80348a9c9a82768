use relative_path::RelativePath;
use std::path::Path;

use crate::io::{IoError, ScanOptions, read_file, relative_to_root, scan_markdown_files};
use crate::models::FileData;
use crate::sections::extract_tables;

/// Reads one markdown file and extracts its tables.
///
/// Tables outside any heading are titled with the file stem.
pub fn parse_markdown_file(relative_path: &RelativePath, root: &Path) -> Result<FileData, IoError> {
    let content = read_file(relative_path, root)?;
    let stem = relative_path.file_stem().unwrap_or_default();

    Ok(FileData {
        file_path: relative_path.normalize(),
        tables: extract_tables(&content, stem),
    })
}

/// Parses every markdown file below `root` that contains at least one table.
///
/// A file that cannot be read is logged and skipped; only a bad root fails
/// the whole scan.
pub fn scan_directory(root: &Path, options: &ScanOptions) -> Result<Vec<FileData>, IoError> {
    let mut results = Vec::new();

    for path in scan_markdown_files(root, options)? {
        let Some(relative_path) = relative_to_root(&path, root) else {
            log::warn!("skipping {}: not below {}", path.display(), root.display());
            continue;
        };

        match parse_markdown_file(&relative_path, root) {
            Ok(file) if file.tables.is_empty() => {}
            Ok(file) => results.push(file),
            Err(err) => log::warn!("skipping {relative_path}: {err}"),
        }
    }

    log::info!("found tables in {} file(s)", results.len());
    Ok(results)
}

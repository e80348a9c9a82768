use crate::models::FileTree;
use relative_path::{Component, RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid data directory: {0}")]
    InvalidRoot(String),
    #[error("Path escapes the data directory: {0}")]
    OutsideRoot(RelativePathBuf),
}

/// Directory names skipped while looking for markdown files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Skipped in addition to every hidden (`.`-prefixed) directory.
    pub excluded_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            excluded_dirs: ["node_modules", "dist", "build"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ScanOptions {
    fn skips_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|dir| dir == name)
    }
}

/// Resolves a root-relative path, refusing anything that climbs above the root.
pub fn resolve(relative_path: &RelativePath, root: &Path) -> Result<PathBuf, IoError> {
    let normalized = relative_path.normalize();
    if normalized.components().any(|c| c == Component::ParentDir) {
        return Err(IoError::OutsideRoot(relative_path.to_relative_path_buf()));
    }
    Ok(normalized.to_path(root))
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = resolve(relative_path, root)?;
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = resolve(relative_path, root)?;
    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Scan for markdown files below the data directory, sorted by path
pub fn scan_markdown_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, IoError> {
    validate_root(root)?;
    let entries = fs::read_dir(root).map_err(IoError::Io)?;

    let mut files = Vec::new();
    scan_entries(entries, options, &mut files);
    files.sort();
    Ok(files)
}

/// Root-relative, `/`-separated form of a path found while scanning.
pub fn relative_to_root(path: &Path, root: &Path) -> Option<RelativePathBuf> {
    let relative = path.strip_prefix(root).ok()?;
    RelativePathBuf::from_path(relative).ok()
}

/// Build a file tree from markdown files in the data directory
pub fn build_file_tree(root: &Path, options: &ScanOptions) -> Result<FileTree, IoError> {
    let files: Vec<RelativePathBuf> = scan_markdown_files(root, options)?
        .iter()
        .filter_map(|file| relative_to_root(file, root))
        .collect();

    let root_name = root
        .file_name()
        .unwrap_or(root.as_os_str())
        .to_string_lossy()
        .to_string();

    Ok(FileTree::build_from_files(root_name, &files))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Below the root, unreadable directories and entries are logged and skipped.
fn scan_directory_recursive(dir: &Path, options: &ScanOptions, files: &mut Vec<PathBuf>) {
    match fs::read_dir(dir) {
        Ok(entries) => scan_entries(entries, options, files),
        Err(err) => log::warn!("skipping unreadable directory {}: {err}", dir.display()),
    }
}

fn scan_entries(entries: fs::ReadDir, options: &ScanOptions, files: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("skipping unreadable directory entry: {err}");
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            let name = entry.file_name();
            if !options.skips_dir(&name.to_string_lossy()) {
                scan_directory_recursive(&path, options, files);
            }
        } else if is_markdown(&path) {
            files.push(path);
        }
    }
}

pub fn validate_root(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidRoot(format!(
            "{} does not exist or is not a directory",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_scan_finds_markdown_files() {
        // Given a data directory with markdown files
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "test1.md", "| a |\n| 1 |");
        create_test_file(&data_dir, "test2.MD", "| b |\n| 2 |");

        // When scanning for files
        let files = scan_markdown_files(data_dir.path(), &ScanOptions::default()).unwrap();

        // Then both extensions match regardless of case
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "test1.md"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "test2.MD"));
    }

    #[test]
    fn test_handle_invalid_root() {
        let result = scan_markdown_files(
            Path::new("/this/path/does/not/exist"),
            &ScanOptions::default(),
        );
        assert!(matches!(result, Err(IoError::InvalidRoot(_))));
        assert!(result.unwrap_err().to_string().contains("data directory"));
    }

    #[test]
    fn test_scan_nested_directories() {
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "root.md", "# Root file");
        create_test_file(&data_dir, "games/retro/nested.md", "# Nested file");

        let files = scan_markdown_files(data_dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "nested.md"));
    }

    #[test]
    fn test_skips_hidden_and_excluded_directories() {
        // Given markdown files inside hidden and build directories
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "keep.md", "");
        create_test_file(&data_dir, ".git/notes.md", "");
        create_test_file(&data_dir, "node_modules/pkg/README.md", "");
        create_test_file(&data_dir, "dist/out.md", "");
        create_test_file(&data_dir, "vendor/lib.md", "");

        // When scanning with an extra exclusion
        let options = ScanOptions {
            excluded_dirs: vec!["vendor".to_string()],
        };
        let files = scan_markdown_files(data_dir.path(), &options).unwrap();

        // Then only the configured names and hidden directories are skipped
        let names: Vec<_> = files
            .iter()
            .filter_map(|f| relative_to_root(f, data_dir.path()))
            .map(|p| p.to_string())
            .collect();
        assert_eq!(names, vec!["dist/out.md", "keep.md", "node_modules/pkg/README.md"]);
    }

    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        // Given a subdirectory that disappears before it is read
        let data_dir = create_test_dir();
        let mut files = Vec::new();

        // When scanning it
        scan_directory_recursive(
            &data_dir.path().join("gone"),
            &ScanOptions::default(),
            &mut files,
        );

        // Then nothing is found and nothing fails
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_locked_subdirectory_does_not_fail_the_scan() {
        use std::os::unix::fs::PermissionsExt;

        // Given a readable file next to a directory without read permission
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "keep.md", "| a |\n| 1 |");
        create_test_file(&data_dir, "locked/hidden.md", "| b |\n| 2 |");
        let locked = data_dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // When scanning the data directory
        let result = scan_markdown_files(data_dir.path(), &ScanOptions::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Then the readable file is still found
        let files = result.unwrap();
        assert!(files.iter().any(|f| f.file_name().unwrap() == "keep.md"));
    }

    #[test]
    fn test_ignore_non_markdown_files() {
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "document.md", "# Markdown");
        create_test_file(&data_dir, "image.png", "fake image data");
        create_test_file(&data_dir, "notes.markdown", "# Other");

        let files = scan_markdown_files(data_dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "document.md");
    }

    #[test]
    fn test_read_file_not_found() {
        let data_dir = create_test_dir();
        let result = read_file(RelativePath::new("nonexistent.md"), data_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_write_then_read() {
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "existing.md", "# Original");
        let relative_path = RelativePath::new("existing.md");

        write_file(relative_path, data_dir.path(), "# Updated").unwrap();

        assert_eq!(read_file(relative_path, data_dir.path()).unwrap(), "# Updated");
    }

    #[test]
    fn test_paths_outside_root_are_refused() {
        let data_dir = create_test_dir();

        let result = read_file(RelativePath::new("games/../../secret.md"), data_dir.path());

        assert!(matches!(result, Err(IoError::OutsideRoot(_))));
    }

    #[test]
    fn test_dot_segments_inside_root_resolve() {
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "games/zelda.md", "| a |\n| 1 |");

        let content = read_file(RelativePath::new("./games/../games/zelda.md"), data_dir.path());

        assert_eq!(content.unwrap(), "| a |\n| 1 |");
    }

    #[test]
    fn test_build_file_tree() {
        let data_dir = create_test_dir();
        create_test_file(&data_dir, "a.md", "");
        create_test_file(&data_dir, "games/b.md", "");

        let tree = build_file_tree(data_dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(tree.root.file_count(), 2);
        assert_eq!(tree.root.children["games"].children["b.md"].path.as_str(), "games/b.md");
    }
}

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary data directory
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file below the data directory, including any parent folders
pub fn create_test_file(data_dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = data_dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

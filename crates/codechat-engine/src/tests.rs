//! Shared helpers for unit tests.

use tempfile::TempDir;

pub fn create_test_project_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

pub fn create_test_file(project: &TempDir, relative: &str, content: &str) {
    let path = project.path().join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write test file");
}

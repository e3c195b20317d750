//! Path utilities for test scratch space.

use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns the path to the sample configuration directory (`config/`).
pub fn config_dir() -> PathBuf {
    workspace_root().join("config")
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Creates a temporary directory with a specific prefix.
pub fn temp_test_dir_with_prefix(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

/// Conventional binary file name for a year (`heff.H<year>`).
pub fn binary_file_name(year: i32) -> String {
    format!("heff.H{year}")
}

/// Conventional output file name for a year (`<year>.nc`).
pub fn output_file_name(year: i32) -> String {
    format!("{year}.nc")
}

/// `grids/`, `binaries/` and `output/` subdirectories under `base`.
pub fn layout_dirs(base: &Path) -> (PathBuf, PathBuf, PathBuf) {
    (
        base.join("grids"),
        base.join("binaries"),
        base.join("output"),
    )
}

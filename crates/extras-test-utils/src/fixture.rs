//! [`FixtureDir`] builder for filesystem test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helper methods for laying out files and
/// asserting on them afterwards.
///
/// # Example
///
/// ```rust,no_run
/// use extras_test_utils::FixtureDir;
///
/// let fixture = FixtureDir::new()
///     .with_file("assets/file.txt", "hello")
///     .with_file("assets/file.yml", "hello: 1\n");
/// fixture.assert_file_contains("assets/file.txt", "hello");
/// ```
pub struct FixtureDir {
    temp_dir: TempDir,
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the fixture.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Absolute path of `relative` as a string, for APIs that take text.
    pub fn path_str(&self, relative: &str) -> String {
        self.path(relative).to_string_lossy().into_owned()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|_| panic!("Could not write fixture file: {}", full_path.display()));
        full_path
    }

    /// Create the directory `relative` and any missing parents.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let full_path = self.path(relative);
        fs::create_dir_all(&full_path).unwrap();
        full_path
    }

    /// Builder form of [`write`](Self::write).
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Builder form of [`mkdir`](Self::mkdir).
    pub fn with_dir(self, relative: &str) -> Self {
        self.mkdir(relative);
        self
    }

    /// Read the file at `relative` as text.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, relative: &str) -> String {
        let full_path = self.path(relative);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(relative).display(),
            content,
            file_content
        );
    }
}

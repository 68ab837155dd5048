//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use crate::constants::SEPARATOR;

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries. Construction only swaps
/// separators; [`clean`](Self::clean) performs lexical normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(self.inner.replace(SEPARATOR, "\\"))
        } else {
            PathBuf::from(&self.inner)
        }
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Whether the path is rooted: `/…`, or on Windows a drive root such as `C:/…`.
    pub fn is_absolute(&self) -> bool {
        !split_root(&self.inner).0.is_empty()
    }

    /// Lexically normalize the path.
    ///
    /// Collapses repeated separators and `.` segments, resolves `..` against
    /// the preceding segment and drops any trailing separator. `..` never
    /// climbs above a root; on a relative path leading `..` segments are kept.
    /// An empty relative result is `.`.
    pub fn clean(&self) -> Self {
        let (root, rest) = split_root(&self.inner);

        let mut parts: Vec<&str> = Vec::new();
        for segment in rest.split(SEPARATOR) {
            match segment {
                "" | "." => {}
                ".." => {
                    if parts.last().is_some_and(|last| *last != "..") {
                        parts.pop();
                    } else if root.is_empty() {
                        parts.push("..");
                    }
                }
                other => parts.push(other),
            }
        }

        let joined = parts.join("/");
        let inner = if !root.is_empty() {
            format!("{root}{joined}")
        } else if joined.is_empty() {
            ".".to_string()
        } else {
            joined
        };
        Self { inner }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let (root, _) = split_root(&self.inner);
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx + 1 > root.len() => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(_) if trimmed.len() > root.len() => Some(Self {
                inner: root.to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    ///
    /// Leading-dot names such as `.env` have no extension.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 || idx + 1 == name.len() {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Split into a [`FileRecord`].
    pub fn record(&self) -> FileRecord {
        let name = self.file_name().unwrap_or_default().to_string();
        let (base, extension) = match self.extension() {
            Some(ext) => (name[..name.len() - ext.len() - 1].to_string(), ext.to_string()),
            None => (name.clone(), String::new()),
        };
        FileRecord {
            path: self.clone(),
            base,
            extension,
            name,
        }
    }
}

/// A path together with its inferred base name, extension and full name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: NormalizedPath,
    /// File name without the final extension
    pub base: String,
    /// Text after the last `.`, empty when there is none
    pub extension: String,
    /// Full file name
    pub name: String,
}

/// Split a path into its base name, extension and full name.
///
/// The path is not resolved; see [`Files::basext`](crate::Files::basext).
pub fn basext(path: impl AsRef<Path>) -> FileRecord {
    NormalizedPath::new(path).record()
}

/// Split off the root: `/`, a drive root like `C:/`, or nothing.
///
/// Drive roots are only recognised on Windows; elsewhere `c:/x` is a
/// relative name.
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with(SEPARATOR) {
        let rest = path.trim_start_matches(SEPARATOR);
        return ("/", rest);
    }
    let bytes = path.as_bytes();
    if cfg!(windows)
        && bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && bytes[2] == b'/'
    {
        return (&path[..3], &path[3..]);
    }
    ("", path)
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

//! Atomic writes and encoding-aware reads

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
/// Missing parent directories are created first. An existing target is
/// resolved through symlinks and keeps its permissions.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let native_path = existing_target(path)?;
    let permissions = fs::metadata(&native_path).ok().map(|m| m.permissions());

    // Same directory keeps the rename on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let written = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .and_then(|mut file| {
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|()| match permissions {
            Some(permissions) => fs::set_permissions(&temp_path, permissions),
            None => Ok(()),
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })
}

/// The file a write to `path` lands in: the symlink target when `path`
/// exists, otherwise `path` itself.
fn existing_target(path: &NormalizedPath) -> Result<PathBuf> {
    let native_path = path.to_native();
    if native_path.exists() {
        dunce::canonicalize(&native_path).map_err(|e| Error::io(&native_path, e))
    } else {
        Ok(native_path)
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    if let Some(parent) = native_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            tracing::debug!(dir = %parent.display(), "Creating parent directory");
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    Ok(())
}

pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native_path = path.to_native();
    fs::read(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read text content from a file as strict UTF-8.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    read_text_with(path, Encoding::Utf8)
}

pub fn read_text_with(path: &NormalizedPath, encoding: Encoding) -> Result<String> {
    let bytes = read_bytes(path)?;
    encoding.decode(path, bytes)
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Append text to a file, creating it and its parent directory if absent.
pub fn append_text(path: &NormalizedPath, content: &str) -> Result<()> {
    let native_path = path.to_native();
    ensure_parent(path)?;

    OpenOptions::new()
        .append(true)
        .create(true)
        .open(&native_path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|e| Error::io(&native_path, e))
}

/// Text encodings accepted when reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8, rejecting invalid sequences
    #[default]
    Utf8,
    /// UTF-8, replacing invalid sequences with U+FFFD
    Utf8Lossy,
    /// ISO-8859-1, every byte maps to the code point of the same value
    Latin1,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Lossy => "utf-8-lossy",
            Self::Latin1 => "latin1",
        }
    }

    /// Decode `bytes` read from `path`.
    pub fn decode(&self, path: &NormalizedPath, bytes: Vec<u8>) -> Result<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).map_err(|_| Error::Encoding {
                path: path.to_native(),
                encoding: self.name().to_string(),
            }),
            Self::Utf8Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Self::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf8-lossy" | "utf-8-lossy" => Ok(Self::Utf8Lossy),
            "latin1" | "latin-1" | "iso-8859-1" | "binary" => Ok(Self::Latin1),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_maps_bytes_to_code_points() {
        let path = NormalizedPath::new("/x");
        let text = Encoding::Latin1.decode(&path, vec![0x63, 0x61, 0x66, 0xe9]).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn strict_utf8_rejects_invalid_bytes() {
        let path = NormalizedPath::new("/x");
        let err = Encoding::Utf8.decode(&path, vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::Encoding { .. }));

        let lossy = Encoding::Utf8Lossy.decode(&path, vec![b'a', 0xff]).unwrap();
        assert_eq!(lossy, "a\u{fffd}");
    }

    #[test]
    fn parses_encoding_names() {
        assert_eq!("UTF-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert!("ebcdic".parse::<Encoding>().is_err());
    }

    #[test]
    fn write_atomic_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path().join("nested/out.txt"));
        write_text(&path, "hello").unwrap();

        assert_eq!(read_text(&path).unwrap(), "hello");
        let names: Vec<_> = fs::read_dir(dir.path().join("nested"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_keeps_mode_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let native = dir.path().join("run.sh");
        fs::write(&native, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&native, fs::Permissions::from_mode(0o755)).unwrap();

        write_text(&NormalizedPath::new(&native), "#!/bin/sh\necho hi\n").unwrap();
        let mode = fs::metadata(&native).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

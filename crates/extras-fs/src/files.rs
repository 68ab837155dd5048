//! Format-aware file access anchored at a [`Resolver`]

use std::fmt;
use std::path::Path;

use extras_value::Value;

use crate::io::{self, Encoding};
use crate::{
    Error, FileRecord, Format, ModuleLoader, NormalizedPath, Resolver, Result, walk,
};

/// What a read returns or a write accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Raw text, written as-is
    Text(String),
    /// A decoded value, encoded by the target's extension when composite
    Document(Value),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Document(_) => None,
        }
    }

    pub fn as_document(&self) -> Option<&Value> {
        match self {
            Self::Document(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// Text becomes a string value.
    pub fn into_document(self) -> Value {
        match self {
            Self::Document(value) => value,
            Self::Text(text) => Value::String(text),
        }
    }

    /// Documents are rendered with their display form.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Document(value) => value.to_string(),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self::Document(value)
    }
}

/// Per-read overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Use this format instead of inferring one from the extension
    pub format: Option<Format>,
    /// Use this encoding instead of the store's default
    pub encoding: Option<Encoding>,
}

impl ReadOptions {
    pub fn format(format: Format) -> Self {
        Self {
            format: Some(format),
            encoding: None,
        }
    }

    pub fn encoding(encoding: Encoding) -> Self {
        Self {
            format: None,
            encoding: Some(encoding),
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }
}

/// Reads and writes files by format, resolving every path first.
///
/// The format is detected from the file extension:
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
/// - `.toml` -> TOML
/// - extensions claimed by the installed loader -> module
/// - anything else -> text
pub struct Files {
    resolver: Resolver,
    encoding: Encoding,
    loader: Option<Box<dyn ModuleLoader>>,
}

impl Files {
    /// Create a store anchored at the process working and home directories.
    pub fn new() -> Result<Self> {
        Resolver::from_env().map(Self::with_resolver)
    }

    pub fn with_resolver(resolver: Resolver) -> Self {
        Self {
            resolver,
            encoding: Encoding::default(),
            loader: None,
        }
    }

    /// Install the loader trusted to evaluate module files.
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Default encoding for reads.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> NormalizedPath {
        self.resolver.resolve_path(path)
    }

    pub fn resolve_all<I, S>(&self, fragments: I) -> NormalizedPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolver.resolve(fragments)
    }

    /// Resolve `path` and split it into base name, extension and name.
    pub fn basext(&self, path: impl AsRef<Path>) -> FileRecord {
        self.resolve(path).record()
    }

    /// The format a read of `record` uses when not overridden.
    pub fn format_of(&self, record: &FileRecord) -> Format {
        match &self.loader {
            Some(loader) if !record.extension.is_empty() && loader.handles(&record.extension) => {
                Format::Module
            }
            _ => Format::from_extension(&record.extension),
        }
    }

    /// Read a file, decoding it by extension.
    ///
    /// Structured files that fail to decode, including bytes invalid in the
    /// read encoding, yield an empty mapping. A missing or unreadable file is
    /// an error.
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Content> {
        self.read_with(path, ReadOptions::default())
    }

    pub fn read_with(&self, path: impl AsRef<Path>, options: ReadOptions) -> Result<Content> {
        let record = self.basext(path);
        let format = options.format.unwrap_or_else(|| self.format_of(&record));
        let encoding = options.encoding.unwrap_or(self.encoding);
        tracing::debug!(path = %record.path, %format, "Reading file");

        match format {
            Format::Module => self.load_module(&record.path).map(Content::Document),
            Format::Text => io::read_text_with(&record.path, encoding).map(Content::Text),
            structured => {
                decode_or_empty(structured, &record.path, encoding).map(Content::Document)
            }
        }
    }

    /// Read a file as text regardless of its extension.
    pub fn read_text(&self, path: impl AsRef<Path>) -> Result<String> {
        io::read_text_with(&self.resolve(path), self.encoding)
    }

    /// Read a file as a value. Text files become a string value.
    pub fn read_document(&self, path: impl AsRef<Path>) -> Result<Value> {
        self.read(path).map(Content::into_document)
    }

    /// Write `content`, creating parent directories.
    ///
    /// Composite documents are encoded by the target's extension. Scalars
    /// are written in display form and text as-is.
    pub fn write(&self, path: impl AsRef<Path>, content: impl Into<Content>) -> Result<()> {
        let path = self.resolve(path);

        let text = match content.into() {
            Content::Text(text) => text,
            Content::Document(value) if value.is_composite() => {
                let extension = path.extension().unwrap_or_default();
                let format = Format::from_extension(extension);
                if !format.is_structured() {
                    return Err(Error::UnsupportedFormat {
                        path: path.to_native(),
                        extension: extension.to_string(),
                    });
                }
                format.encode(&path, &value)?
            }
            Content::Document(value) => value.to_string(),
        };

        tracing::debug!(path = %path, bytes = text.len(), "Writing file");
        io::write_text(&path, &text)
    }

    /// Append text, creating the file if absent.
    pub fn append(&self, path: impl AsRef<Path>, text: &str) -> Result<()> {
        let path = self.resolve(path);
        tracing::debug!(path = %path, bytes = text.len(), "Appending to file");
        io::append_text(&path, text)
    }

    /// Replace a file's text with the result of `edit`.
    ///
    /// Returning `None` empties the file.
    pub fn edit<F>(&self, path: impl AsRef<Path>, edit: F) -> Result<()>
    where
        F: FnOnce(String) -> Option<String>,
    {
        let path = self.resolve(path);
        let current = io::read_text_with(&path, self.encoding)?;
        let updated = edit(current).unwrap_or_default();

        tracing::debug!(path = %path, bytes = updated.len(), "Editing file");
        io::write_text(&path, &updated)
    }

    /// Whether the resolved path exists. An empty path never does.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        !path.as_os_str().is_empty() && self.resolve(path).exists()
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        !path.as_os_str().is_empty() && self.resolve(path).is_dir()
    }

    /// Every file below `root`; see [`walk::tree`].
    pub fn tree(&self, root: impl AsRef<Path>) -> Result<Vec<NormalizedPath>> {
        walk::tree(&self.resolve(root))
    }

    pub fn tree_sorted(&self, root: impl AsRef<Path>) -> Result<Vec<NormalizedPath>> {
        walk::tree_sorted(&self.resolve(root))
    }

    /// Visit every file below `dir` with its parent directory.
    pub fn walk<F>(&self, dir: impl AsRef<Path>, visit: F) -> Result<()>
    where
        F: FnMut(&NormalizedPath, &NormalizedPath),
    {
        walk::walk(&self.resolve(dir), visit)
    }

    /// Immediate entries of `dir` in numeric-aware order.
    pub fn dir(&self, path: impl AsRef<Path>) -> Result<Vec<NormalizedPath>> {
        walk::list_dir(&self.resolve(path))
    }

    fn load_module(&self, path: &NormalizedPath) -> Result<Value> {
        match &self.loader {
            Some(loader) => loader.load(path),
            None => Err(Error::UntrustedModule {
                path: path.to_native(),
            }),
        }
    }
}

impl fmt::Debug for Files {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Files")
            .field("resolver", &self.resolver)
            .field("encoding", &self.encoding)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

/// Undecodable bytes or text yield an empty mapping; I/O failures propagate.
fn decode_or_empty(format: Format, path: &NormalizedPath, encoding: Encoding) -> Result<Value> {
    let decoded =
        io::read_text_with(path, encoding).and_then(|text| format.decode(path, &text));
    match decoded {
        Ok(value) => Ok(value),
        Err(e @ (Error::Encoding { .. } | Error::Parse { .. })) => {
            tracing::warn!(path = %path, error = %e, "Decode failed, using an empty mapping");
            Ok(Value::mapping())
        }
        Err(e) => Err(e),
    }
}

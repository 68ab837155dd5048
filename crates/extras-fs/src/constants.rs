//! Path markers recognised by the resolver.

/// Separator used by [`NormalizedPath`](crate::NormalizedPath) internally.
///
/// Native separators are converted on the way in and restored by
/// `to_native()` at I/O boundaries.
pub const SEPARATOR: char = '/';

/// Prefix markers that change where a joined path is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `./`, the current working directory
    CurrentDir,
    /// `~`, the invoking user's home directory
    Home,
}

impl Marker {
    /// Get the string representation of the marker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentDir => "./",
            Self::Home => "~",
        }
    }

    /// Strip this marker from the front of `path`, returning the remainder.
    ///
    /// The home marker only matches on its own or when followed by a
    /// separator, so `~user` is an ordinary relative name.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            Self::CurrentDir => path.strip_prefix("./"),
            Self::Home => match path.strip_prefix('~')? {
                "" => Some(""),
                rest => rest.strip_prefix(SEPARATOR),
            },
        }
    }
}

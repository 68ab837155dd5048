//! Anchoring path fragments to absolute, lexically clean paths

use std::path::Path;

use crate::constants::Marker;
use crate::{Error, NormalizedPath, Result};

/// Turns fragment lists into absolute paths.
///
/// The working directory and home directory are plain configuration, so a
/// resolver can be built for any pair of directories without touching
/// process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    cwd: NormalizedPath,
    home: NormalizedPath,
}

impl Resolver {
    /// Build a resolver from explicit directories.
    ///
    /// Relative inputs are anchored at `/` so every resolved path is absolute.
    pub fn new(cwd: impl AsRef<Path>, home: impl AsRef<Path>) -> Self {
        Self {
            cwd: anchor(NormalizedPath::new(cwd)),
            home: anchor(NormalizedPath::new(home)),
        }
    }

    /// Build a resolver from the process working directory and the user's
    /// home directory.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        Ok(Self::new(dunce::simplified(&cwd), dunce::simplified(&home)))
    }

    pub fn cwd(&self) -> &NormalizedPath {
        &self.cwd
    }

    pub fn home(&self) -> &NormalizedPath {
        &self.home
    }

    /// Join `fragments` and anchor the result.
    ///
    /// A leading `./` anchors at the working directory, `~` or `~/…` at the
    /// home directory, and any other relative path at the working directory.
    /// Empty fragments are skipped. The result is always cleaned.
    pub fn resolve<I, S>(&self, fragments: I) -> NormalizedPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = fragments
            .into_iter()
            .filter(|f| !f.as_ref().is_empty())
            .map(|f| NormalizedPath::new(f.as_ref()).as_str().to_string())
            .collect::<Vec<_>>()
            .join("/");

        let anchored = if let Some(rest) = Marker::CurrentDir.strip(&joined) {
            self.cwd.join(rest)
        } else if let Some(rest) = Marker::Home.strip(&joined) {
            self.home.join(rest)
        } else {
            let path = NormalizedPath::new(&joined);
            if path.is_absolute() {
                path
            } else {
                self.cwd.join(&joined)
            }
        };

        anchored.clean()
    }

    /// Resolve a single path.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> NormalizedPath {
        let path = NormalizedPath::new(path);
        self.resolve([path.as_str()])
    }
}

fn anchor(path: NormalizedPath) -> NormalizedPath {
    if path.is_absolute() {
        path.clean()
    } else {
        NormalizedPath::new("/").join(path.as_str()).clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::new("/work/project", "/home/me")
    }

    #[test]
    fn relative_directories_are_anchored_at_root() {
        let resolver = Resolver::new("work", "home/me/");
        assert_eq!(resolver.cwd().as_str(), "/work");
        assert_eq!(resolver.home().as_str(), "/home/me");
    }

    #[test]
    fn empty_fragments_are_skipped() {
        assert_eq!(resolver().resolve(["", "a", ""]).as_str(), "/work/project/a");
        assert_eq!(resolver().resolve(Vec::<String>::new()).as_str(), "/work/project");
    }
}

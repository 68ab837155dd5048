//! Compiled regular-expression leaves

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};

/// A compiled regular expression together with the literal it came from.
///
/// Flags follow the inline literal syntax: `i` (case-insensitive),
/// `m` (multi-line), `s` (dot matches newline) and `g` (global, recorded
/// but without effect on matching).
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from its source and flag letters.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let flags = flags.into();
        let invalid = |message: String| Error::InvalidPattern {
            pattern: source.clone(),
            flags: flags.clone(),
            message,
        };

        let mut builder = RegexBuilder::new(&source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' => {}
                other => return Err(invalid(format!("unsupported flag '{other}'"))),
            }
        }

        let regex = builder.build().map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    /// The uncompiled pattern source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The flag letters the pattern was compiled with.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.flags.contains('i')
    }

    pub fn is_global(&self) -> bool {
        self.flags.contains('g')
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

/// Renders the inline literal form, `%r/<source>/<flags>`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%r/{}/{}", self.source, self.flags)
    }
}

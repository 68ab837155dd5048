//! Runtime type tags

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Runtime type tag of a [`Value`](crate::Value).
///
/// Tags are what `clean` filters match against and what `type_of` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Date,
    Regexp,
    Array,
    Object,
}

impl TypeTag {
    /// Get the lowercase name of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Date => "date",
            Self::Regexp => "regexp",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// All tags, in declaration order.
    pub fn all() -> &'static [TypeTag] {
        &[
            Self::Undefined,
            Self::Null,
            Self::Boolean,
            Self::Number,
            Self::String,
            Self::Date,
            Self::Regexp,
            Self::Array,
            Self::Object,
        ]
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|tag| tag.as_str() == lowered)
            .ok_or_else(|| Error::UnknownTypeTag(s.to_string()))
    }
}

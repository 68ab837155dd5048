//! The structured document value type

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use indexmap::IndexMap;
use serde_json::Number;

use crate::pattern::Pattern;
use crate::tag::TypeTag;

/// String-keyed mapping that keeps insertion order for round-trip text.
pub type Mapping = IndexMap<String, Value>;

/// A nested composite of mappings, sequences and scalar leaves.
///
/// Decoded JSON documents only contain the JSON-shaped variants. `Date` and
/// `Regex` leaves are produced by [`transform`](crate::transform) (YAML
/// timestamps and TOML date-times also decode to `Date`), and `Undefined`
/// marks a slot that holds no value at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<FixedOffset>),
    Regex(Pattern),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// An empty mapping.
    pub fn mapping() -> Self {
        Self::Mapping(Mapping::new())
    }

    /// Runtime type tag of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Undefined => TypeTag::Undefined,
            Self::Null => TypeTag::Null,
            Self::Bool(_) => TypeTag::Boolean,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Date(_) => TypeTag::Date,
            Self::Regex(_) => TypeTag::Regexp,
            Self::Sequence(_) => TypeTag::Array,
            Self::Mapping(_) => TypeTag::Object,
        }
    }

    /// Whether this is a mapping or a sequence.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Whether this is `Null` or `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Self::Regex(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key if this is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Visit every non-composite leaf mutably.
    ///
    /// Uses an explicit work stack, so nesting depth is bounded by memory
    /// rather than by the call stack. A non-composite `self` is itself the
    /// only leaf visited.
    pub fn for_each_leaf_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        let mut stack: Vec<&mut Value> = vec![self];
        while let Some(value) = stack.pop() {
            match value {
                Self::Sequence(items) => stack.extend(items.iter_mut()),
                Self::Mapping(map) => stack.extend(map.values_mut()),
                leaf => f(leaf),
            }
        }
    }
}

/// Scalars render as plain text; composites render as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => Ok(()),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&format_date(d)),
            Self::Regex(p) => write!(f, "{p}"),
            Self::Sequence(_) | Self::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// RFC 3339 text for a date leaf, with sub-second digits only when present.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no number representation and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Self::Number).unwrap_or(Self::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(d: DateTime<FixedOffset>) -> Self {
        Self::Date(d)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Self::Regex(p)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Self::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().collect())
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

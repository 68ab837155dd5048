//! Loose value conversions for untyped input (query strings, env values)

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use regex::Regex;

use crate::detect;
use crate::error::Error;
use crate::value::Value;

static INTEGER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+").unwrap());
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// Spellings that count as false in [`is_truthy`].
pub const FALSY: &[&str] = &["false", "null", "NaN", "undefined", "0"];

/// Target of a [`convert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    String,
    Id,
    Integer,
    Float,
    Date,
    Boolean,
}

impl FromStr for Conversion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(Self::String),
            "id" => Ok(Self::Id),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "number" => Ok(Self::Float),
            "date" => Ok(Self::Date),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(Error::UnknownConversion(s.to_string())),
        }
    }
}

/// Whether loosely-typed text should be read as true.
pub fn is_truthy(text: &str) -> bool {
    !text.is_empty() && !FALSY.contains(&text)
}

/// Convert `value` to the requested kind.
///
/// Conversions that cannot produce a meaningful result yield `Null`.
pub fn convert(value: &Value, kind: Conversion) -> Value {
    match kind {
        Conversion::String | Conversion::Id => Value::String(value.to_string()),
        Conversion::Integer => to_integer(value),
        Conversion::Float => to_float(value),
        Conversion::Date => to_date(value).map(Value::Date).unwrap_or(Value::Null),
        Conversion::Boolean => Value::Bool(to_bool(value)),
    }
}

fn to_integer(value: &Value) -> Value {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => n
                .as_f64()
                .map(|f| Value::from(f.trunc() as i64))
                .unwrap_or(Value::Null),
        },
        Value::String(s) => INTEGER_PREFIX
            .find(s.trim_start())
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn to_float(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => FLOAT_PREFIX
            .find(s.trim_start())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(Value::from)
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

fn to_date(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Number(n) => {
            let millis = n.as_i64()?;
            Utc.timestamp_millis_opt(millis).single().map(|d| d.fixed_offset())
        }
        Value::String(s) => {
            let s = s.trim();
            detect::parse_date(s)
                .or_else(|| DateTime::parse_from_rfc3339(s).ok())
                .or_else(|| {
                    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
                    Some(day.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset())
                })
        }
        _ => None,
    }
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => is_truthy(s),
        _ => true,
    }
}

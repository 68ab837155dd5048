//! File formats and their codecs
//!
//! Structured formats decode into [`Value`] trees. Decoding never guesses:
//! the format comes from the file extension or an explicit override.

use std::fmt;
use std::str::FromStr;

use extras_value::{Mapping, Value, parse_date};
use serde_yaml::Value as YamlValue;

use crate::{Error, NormalizedPath, Result};

/// How a file's content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    Toml,
    /// Raw text, returned unparsed
    Text,
    /// Executable module evaluated by an installed [`ModuleLoader`](crate::ModuleLoader)
    Module,
}

impl Format {
    /// Infer the format from a file extension.
    ///
    /// Unknown extensions are text. Modules are never inferred here because
    /// they depend on which loader is installed.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            "toml" => Self::Toml,
            _ => Self::Text,
        }
    }

    /// Whether content decodes into a [`Value`] tree.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Json | Self::Yaml | Self::Toml)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Text => "text",
            Self::Module => "module",
        }
    }

    /// Extensions mapped to this format by [`from_extension`](Self::from_extension).
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::Toml => &["toml"],
            Self::Text | Self::Module => &[],
        }
    }

    /// Decode `source` read from `path`.
    ///
    /// Empty content and a top-level null decode to an empty mapping.
    pub fn decode(&self, path: &NormalizedPath, source: &str) -> Result<Value> {
        if self.is_structured() && source.trim().is_empty() {
            return Ok(Value::mapping());
        }

        let value = match self {
            Self::Json => serde_json::from_str::<Value>(source)
                .map_err(|e| self.parse_error(path, e))?,
            Self::Yaml => serde_yaml::from_str::<YamlValue>(source)
                .map(yaml_to_value)
                .map_err(|e| self.parse_error(path, e))?,
            Self::Toml => toml::from_str::<toml::Table>(source)
                .map(|table| toml_to_value(toml::Value::Table(table)))
                .map_err(|e| self.parse_error(path, e))?,
            Self::Text => return Ok(Value::String(source.to_string())),
            Self::Module => {
                return Err(Error::UntrustedModule {
                    path: path.to_native(),
                });
            }
        };

        Ok(match value {
            Value::Null | Value::Undefined => Value::mapping(),
            other => other,
        })
    }

    /// Encode `value` for writing to `path`.
    pub fn encode(&self, path: &NormalizedPath, value: &Value) -> Result<String> {
        match self {
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| self.serialize_error(path, e)),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| self.serialize_error(path, e)),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| self.serialize_error(path, e)),
            Self::Text => Ok(value.to_string()),
            Self::Module => Err(Error::UnsupportedFormat {
                path: path.to_native(),
                extension: path.extension().unwrap_or_default().to_string(),
            }),
        }
    }

    fn parse_error(&self, path: &NormalizedPath, err: impl fmt::Display) -> Error {
        Error::Parse {
            path: path.to_native(),
            format: self.name().to_string(),
            message: err.to_string(),
        }
    }

    fn serialize_error(&self, path: &NormalizedPath, err: impl fmt::Display) -> Error {
        Error::Serialize {
            path: path.to_native(),
            format: self.name().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "text" | "txt" => Ok(Self::Text),
            "module" => Ok(Self::Module),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

fn yaml_to_value(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64().map(Value::from).unwrap_or(Value::Null)
            }
        }
        // Timestamps load as dates, as YAML 1.1 resolves them
        YamlValue::String(s) => match parse_date(&s) {
            Some(date) => Value::Date(date),
            None => Value::String(s),
        },
        YamlValue::Sequence(items) => Value::Sequence(items.into_iter().map(yaml_to_value).collect()),
        YamlValue::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_value(v)))
                .collect::<Mapping>(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

/// Mapping keys are strings; scalar keys keep their YAML spelling.
fn yaml_key(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn toml_to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => {
            // Local dates and times have no instant; keep them as text
            let text = dt.to_string();
            match parse_date(&text) {
                Some(date) if dt.date.is_some() && dt.time.is_some() => Value::Date(date),
                _ => Value::String(text),
            }
        }
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect::<Mapping>(),
        ),
    }
}

//! Dot-notation flattening and its inverse
//!
//! [`dot`] walks nested mappings depth-first and joins the keys on the way to
//! each leaf. Sequences, empty mappings and every scalar are leaves; sequences
//! are never expanded index by index.
//!
//! [`undot`] splits keys on the separator and rebuilds the nesting. When a key
//! path collides with an earlier one the later write wins:
//!
//! - a leaf assigned where a leaf or mapping already sits replaces it,
//! - a key path that runs through an existing leaf replaces that leaf with a
//!   mapping,
//! - a mapping assigned where a mapping already sits is merged into it.

use crate::value::{Mapping, Value};

/// Default key-path separator.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Flatten nested mappings into a single-level mapping of joined key paths.
///
/// A non-mapping input has no keys and yields an empty mapping.
pub fn dot(value: &Value, separator: &str) -> Mapping {
    let mut flat = Mapping::new();
    if let Value::Mapping(map) = value {
        flatten_into(&mut flat, None, map, separator);
    }
    flat
}

fn flatten_into(flat: &mut Mapping, prefix: Option<&str>, map: &Mapping, separator: &str) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{prefix}{separator}{key}"),
            None => key.clone(),
        };
        match value {
            Value::Mapping(inner) if !inner.is_empty() => {
                flatten_into(flat, Some(&path), inner, separator);
            }
            leaf => {
                flat.insert(path, leaf.clone());
            }
        }
    }
}

/// Rebuild nested mappings from joined key paths.
///
/// Mapping values are undotted as well, so dotted keys may appear at any
/// level of the input. An empty separator disables splitting.
pub fn undot(map: &Mapping, separator: &str) -> Mapping {
    let mut nested = Mapping::new();
    for (key, value) in map {
        let value = match value {
            Value::Mapping(inner) => Value::Mapping(undot(inner, separator)),
            other => other.clone(),
        };
        let segments: Vec<&str> = if separator.is_empty() {
            vec![key.as_str()]
        } else {
            key.split(separator).collect()
        };
        insert_path(&mut nested, &segments, value);
    }
    nested
}

/// Undot a value; anything other than a mapping is returned unchanged.
pub fn undot_value(value: &Value, separator: &str) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(undot(map, separator)),
        other => other.clone(),
    }
}

fn insert_path(target: &mut Mapping, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut cursor = target;
    for segment in parents {
        let slot = cursor
            .entry((*segment).to_string())
            .or_insert_with(Value::mapping);
        cursor = ensure_mapping(slot);
    }

    assign(cursor, (*last).to_string(), value);
}

fn assign(target: &mut Mapping, key: String, value: Value) {
    match value {
        Value::Mapping(incoming) => match target.get_mut(&key) {
            Some(Value::Mapping(existing)) => merge(existing, incoming),
            _ => {
                target.insert(key, Value::Mapping(incoming));
            }
        },
        value => {
            target.insert(key, value);
        }
    }
}

fn ensure_mapping(slot: &mut Value) -> &mut Mapping {
    if !slot.is_mapping() {
        *slot = Value::mapping();
    }
    match slot {
        Value::Mapping(map) => map,
        _ => unreachable!("slot was just replaced with a mapping"),
    }
}

fn merge(target: &mut Mapping, incoming: Mapping) {
    for (key, value) in incoming {
        assign(target, key, value);
    }
}

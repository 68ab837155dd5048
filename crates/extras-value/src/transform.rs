//! Leaf normalization: trimming and string coercion

use crate::detect;
use crate::value::Value;

/// Which leaf rewrites [`transform_with`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformPolicy {
    /// Trim surrounding whitespace from string leaves.
    pub trim: bool,
    /// Replace `%r/<source>/<flags>` literals with compiled patterns.
    pub regexps: bool,
    /// Replace date-time text with date leaves.
    pub dates: bool,
}

impl Default for TransformPolicy {
    fn default() -> Self {
        Self {
            trim: true,
            regexps: true,
            dates: true,
        }
    }
}

impl TransformPolicy {
    /// Trim strings without coercing them.
    pub fn trim_only() -> Self {
        Self {
            trim: true,
            regexps: false,
            dates: false,
        }
    }
}

/// Trim and coerce every string leaf using the default policy.
pub fn transform(value: &mut Value) {
    transform_with(value, &TransformPolicy::default());
}

/// Trim every string leaf in place, leaving its type alone.
pub fn trim(value: &mut Value) {
    transform_with(value, &TransformPolicy::trim_only());
}

/// Rewrite every string leaf of `value` according to `policy`.
///
/// Composites are descended into; a scalar `value` is treated as the only
/// leaf. The regular-expression literal check runs before the date check.
/// Text that fails either coercion stays text.
pub fn transform_with(value: &mut Value, policy: &TransformPolicy) {
    value.for_each_leaf_mut(|leaf| {
        if let Value::String(text) = leaf {
            if let Some(coerced) = coerce(text, policy) {
                *leaf = coerced;
            }
        }
    });
}

/// Consuming variant of [`transform`].
pub fn transformed(mut value: Value) -> Value {
    transform(&mut value);
    value
}

fn coerce(text: &mut String, policy: &TransformPolicy) -> Option<Value> {
    if policy.trim {
        let trimmed = text.trim();
        if trimmed.len() != text.len() {
            *text = trimmed.to_string();
        }
    }
    if policy.regexps {
        if let Some(pattern) = detect::parse_regexp(text) {
            return Some(Value::Regex(pattern));
        }
    }
    if policy.dates {
        if let Some(date) = detect::parse_date(text) {
            return Some(Value::Date(date));
        }
    }
    None
}

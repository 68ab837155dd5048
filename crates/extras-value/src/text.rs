//! Plain-text helpers

use crate::value::Value;

/// Default separator for [`strip`].
pub const LINE_SEPARATOR: &str = "\n";

/// Split `text` on `separator`, trim every piece and join them back.
///
/// Empty pieces are kept, so blank lines survive.
pub fn strip(text: &str, separator: &str) -> String {
    if separator.is_empty() {
        return text.trim().to_string();
    }
    text.split(separator)
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(separator)
}

/// [`strip`] with the line separator.
pub fn strip_lines(text: &str) -> String {
    strip(text, LINE_SEPARATOR)
}

/// Placeholder replaced by [`format`].
pub const PLACEHOLDER: &str = "%s";

/// Fill `%s` placeholders in `template` from `args`, left to right.
///
/// Each argument replaces the first remaining placeholder. Surplus
/// placeholders stay in the text and surplus arguments are ignored.
/// Sequences render as `a, b`, mappings as `k: v, k: v`, and scalars in
/// their display form.
pub fn format(template: &str, args: &[Value]) -> String {
    let mut text = template.to_string();
    for arg in args {
        let Some(at) = text.find(PLACEHOLDER) else {
            break;
        };
        text.replace_range(at..at + PLACEHOLDER.len(), &argument_text(arg));
    }
    text
}

fn argument_text(arg: &Value) -> String {
    match arg {
        Value::Sequence(items) => items.iter().map(item_text).collect::<Vec<_>>().join(", "),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", item_text(value)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Undefined => "undefined".to_string(),
        scalar => scalar.to_string(),
    }
}

/// Nested items: nullish values are blank and nested sequences comma-joined.
fn item_text(item: &Value) -> String {
    match item {
        Value::Null | Value::Undefined => String::new(),
        Value::Sequence(items) => items.iter().map(item_text).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

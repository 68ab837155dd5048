//! Predicate-based pruning of nested documents

use crate::tag::TypeTag;
use crate::value::Value;

/// Remove matching entries from every mapping and sequence in `value`.
///
/// With no filters, entries holding `Null` or `Undefined` are removed. With
/// filters, entries whose type tag is listed are removed instead, so passing
/// `[TypeTag::Null]` keeps `Undefined` entries. Removal happens before a
/// container's surviving children are visited.
pub fn clean(value: &mut Value, filters: &[TypeTag]) {
    let mut stack: Vec<&mut Value> = vec![value];
    while let Some(current) = stack.pop() {
        match current {
            Value::Mapping(map) => {
                map.retain(|_, v| !removes(v, filters));
                stack.extend(map.values_mut());
            }
            Value::Sequence(items) => {
                items.retain(|v| !removes(v, filters));
                stack.extend(items.iter_mut());
            }
            _ => {}
        }
    }
}

fn removes(value: &Value, filters: &[TypeTag]) -> bool {
    if filters.is_empty() {
        value.is_nullish()
    } else {
        filters.contains(&value.type_tag())
    }
}

/// Consuming variant of [`clean`].
pub fn cleaned(mut value: Value, filters: &[TypeTag]) -> Value {
    clean(&mut value, filters);
    value
}

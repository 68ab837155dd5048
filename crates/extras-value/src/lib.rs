//! Structured document values for extras
//!
//! Provides the tagged [`Value`] tree produced by decoding structured files
//! and the traversals that normalize it: trimming and coercion, dot-notation
//! flattening, and predicate-based pruning.

pub mod clean;
pub mod convert;
pub mod detect;
pub mod dot;
pub mod error;
pub mod pattern;
mod serialize;
pub mod tag;
pub mod text;
pub mod transform;
pub mod value;

pub use clean::{clean, cleaned};
pub use convert::{Conversion, convert, is_truthy};
pub use detect::{is_date, is_regexp, parse_date, parse_regexp};
pub use dot::{DEFAULT_SEPARATOR, dot, undot, undot_value};
pub use error::{Error, Result};
pub use pattern::Pattern;
pub use tag::TypeTag;
pub use text::{format, strip, strip_lines};
pub use transform::{TransformPolicy, transform, transform_with, transformed, trim};
pub use value::{Mapping, Value};

/// Runtime type tag of `value`.
pub fn type_of(value: &Value) -> TypeTag {
    value.type_tag()
}

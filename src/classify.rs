//! Shape predicates for loosely typed record values.
//!
//! These are used at the validation boundary only. Once a record has been
//! parsed into a [`Record`][`crate::Record`], nothing re-checks its shape.

use serde_json::Value;

/// Returns true if the value counts as "nothing".
///
/// Null, `false`, any zero number, empty text, and empty arrays or objects
/// are emptyish.
///
/// # Examples
///
/// ```
/// use flatforest::classify::is_emptyish;
/// use serde_json::json;
///
/// assert!(is_emptyish(&json!(null)));
/// assert!(is_emptyish(&json!(0)));
/// assert!(is_emptyish(&json!("")));
/// assert!(is_emptyish(&json!([])));
/// assert!(!is_emptyish(&json!("0")));
/// assert!(!is_emptyish(&json!({ "id": 1 })));
/// ```
#[must_use]
pub fn is_emptyish(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Returns true if the value is an ordered sequence.
#[inline]
#[must_use]
pub fn is_sequence(value: &Value) -> bool {
    value.is_array()
}

/// Returns true if the value is text.
#[inline]
#[must_use]
pub fn is_text(value: &Value) -> bool {
    value.is_string()
}

/// Returns true if the value is a whole (non-negative integer) number.
///
/// Floating point numbers with no fractional part qualify too, so `2.0` is
/// whole while `2.5` and `-1` are not.
#[must_use]
pub fn is_whole_number(value: &Value) -> bool {
    as_whole_number(value).is_some()
}

/// Returns the value as a whole number, if it is one.
#[must_use]
pub(crate) fn as_whole_number(value: &Value) -> Option<u64> {
    let n = match value {
        Value::Number(n) => n,
        _ => return None,
    };
    if let Some(v) = n.as_u64() {
        return Some(v);
    }
    // Integral floats such as `2.0` arrive here.
    let f = n.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

//! Diff computation engine.
//!
//! The entry point is [`compare`], a pure function over two JSON values.

use crate::diff::model::{DiffEntry, DiffReport};
use crate::errors::{PcError, PcErrorKind, Result};
use serde_json::{Number, Value};
use std::collections::HashSet;

/// Stand-in for a key that is missing from the right-hand object.
static ABSENT: Value = Value::Null;

/// Compare two JSON documents and report every difference.
///
/// # Errors
///
/// - `UnsupportedArrayElement`: two unequal arrays were found and at least one
///   of them holds an object or array element. Equal arrays never fail.
pub fn compare(a: &Value, b: &Value) -> Result<DiffReport> {
    let mut differences = Vec::new();
    compare_at(a, b, "", &mut differences)?;
    Ok(DiffReport::from_entries(differences))
}

fn compare_at(a: &Value, b: &Value, path: &str, out: &mut Vec<DiffEntry>) -> Result<()> {
    match (a, b) {
        (Value::Object(left), Value::Object(right)) => {
            for (key, left_value) in left {
                let right_value = right.get(key).unwrap_or(&ABSENT);
                compare_at(left_value, right_value, &join_path(path, key), out)?;
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            if let Some(entry) = compare_arrays(left, right, path)? {
                out.push(entry);
            }
        }
        (Value::Number(left), Value::Number(right)) => {
            if NumberKey::of(left) != NumberKey::of(right) {
                out.push(DiffEntry::changed(path, a.clone(), b.clone()));
            }
        }
        _ => {
            if a != b {
                out.push(DiffEntry::changed(path, a.clone(), b.clone()));
            }
        }
    }
    Ok(())
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", path, key)
    }
}

/// Set-compare two arrays, ignoring order and duplicates.
fn compare_arrays(left: &[Value], right: &[Value], path: &str) -> Result<Option<DiffEntry>> {
    if left == right {
        return Ok(None);
    }

    let left_keys = leaf_keys(left, path)?;
    let right_keys = leaf_keys(right, path)?;

    let only_left = set_difference(&left_keys, &right_keys);
    let only_right = set_difference(&right_keys, &left_keys);

    if only_left.is_empty() && only_right.is_empty() {
        return Ok(None);
    }
    Ok(Some(DiffEntry::set_delta(path, only_left, only_right)))
}

/// Numeric identity shared by scalar and set comparison.
///
/// Integral values compare as exact integers whatever their JSON spelling, so
/// `1`, `1.0` and `1e0` are one number, as are `0.0` and `-0.0`. Other floats
/// compare by bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum NumberKey {
    Integer(i128),
    Float(u64),
}

impl NumberKey {
    fn of(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return NumberKey::Integer(i128::from(i));
        }
        if let Some(u) = n.as_u64() {
            return NumberKey::Integer(i128::from(u));
        }
        let f = n.as_f64().unwrap_or(0.0);
        if f.fract() == 0.0 && f.abs() < I128_BOUND {
            return NumberKey::Integer(f as i128);
        }
        NumberKey::Float(f.to_bits())
    }
}

/// Integral floats below this magnitude convert to `i128` exactly.
const I128_BOUND: f64 = i128::MAX as f64;

/// Hashable projection of a scalar JSON value.
#[derive(Debug, PartialEq, Eq, Hash)]
enum LeafKey<'a> {
    Null,
    Bool(bool),
    Number(NumberKey),
    String(&'a str),
}

fn leaf_keys<'a>(items: &'a [Value], path: &str) -> Result<Vec<(LeafKey<'a>, &'a Value)>> {
    items
        .iter()
        .map(|item| {
            let key = match item {
                Value::Null => LeafKey::Null,
                Value::Bool(b) => LeafKey::Bool(*b),
                Value::Number(n) => LeafKey::Number(NumberKey::of(n)),
                Value::String(s) => LeafKey::String(s.as_str()),
                Value::Array(_) | Value::Object(_) => {
                    return Err(unsupported_element(item, path));
                }
            };
            Ok((key, item))
        })
        .collect()
}

/// Members of `from` absent from `other`, deduplicated, in first-seen order.
fn set_difference(
    from: &[(LeafKey<'_>, &Value)],
    other: &[(LeafKey<'_>, &Value)],
) -> Vec<Value> {
    let exclude: HashSet<&LeafKey<'_>> = other.iter().map(|(key, _)| key).collect();
    let mut seen = HashSet::new();
    from.iter()
        .filter(|(key, _)| !exclude.contains(key) && seen.insert(key))
        .map(|(_, value)| (*value).clone())
        .collect()
}

fn unsupported_element(item: &Value, path: &str) -> PcError {
    let element = if item.is_object() { "object" } else { "array" };
    let location = if path.is_empty() { "<root>" } else { path };
    PcError::new(PcErrorKind::UnsupportedArrayElement)
        .with_op("compare")
        .with_path(location)
        .with_message(format!(
            "unsupported composite array element: array at '{}' contains an {} element; \
             only null, boolean, number and string elements can be compared as a set",
            location, element
        ))
}

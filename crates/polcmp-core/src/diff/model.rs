//! Diff output types.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// One side of a [`DiffEntry`]
///
/// Scalar and object mismatches carry the original value. Array mismatches
/// carry the elements found only on that side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DiffValue {
    Value(Value),
    Set(Vec<Value>),
}

/// A single difference located by a slash-delimited path
///
/// The root path is the empty string; `"settings/firewall"` addresses the
/// `firewall` key of the `settings` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub path: String,
    pub value1: DiffValue,
    pub value2: DiffValue,
}

impl DiffEntry {
    pub(crate) fn changed(path: &str, value1: Value, value2: Value) -> Self {
        Self {
            path: path.to_string(),
            value1: DiffValue::Value(value1),
            value2: DiffValue::Value(value2),
        }
    }

    pub(crate) fn set_delta(path: &str, only_left: Vec<Value>, only_right: Vec<Value>) -> Self {
        Self {
            path: path.to_string(),
            value1: DiffValue::Set(only_left),
            value2: DiffValue::Set(only_right),
        }
    }
}

/// The result of comparing two documents
///
/// `identical` is derived from the entry list and cannot be set on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffReport {
    differences: Vec<DiffEntry>,
}

impl DiffReport {
    pub(crate) fn from_entries(differences: Vec<DiffEntry>) -> Self {
        Self { differences }
    }

    /// True iff no differences were recorded
    pub fn identical(&self) -> bool {
        self.differences.is_empty()
    }

    /// Differences in traversal order
    pub fn differences(&self) -> &[DiffEntry] {
        &self.differences
    }

    /// Look up the entry recorded at `path`
    pub fn entry_at(&self, path: &str) -> Option<&DiffEntry> {
        self.differences.iter().find(|e| e.path == path)
    }
}

impl Serialize for DiffReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiffReport", 2)?;
        state.serialize_field("identical", &self.identical())?;
        state.serialize_field("differences", &self.differences)?;
        state.end()
    }
}

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single named property attached to a message.
///
/// The stored name keeps its original casing; every comparison in this crate
/// folds case first, so `"RequestId"` and `"requestid"` are the same key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The case-folded form of the name, used for all key comparisons.
    pub(crate) fn key(&self) -> String {
        fold_key(&self.name)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Fold a property name to its comparison key (Unicode lowercase).
pub(crate) fn fold_key(name: &str) -> String {
    name.to_lowercase()
}

/// How an incoming property list combines with an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Replace the entire property list with the incoming list.
    #[default]
    Set,
    /// Case-insensitive key union; incoming values win on collision.
    Merge,
    /// Case-insensitive key union; existing values win on collision.
    AddIfNotExists,
}

/// Combine `existing` and `incoming` under `policy`, producing a list whose
/// keys are unique under case-insensitive comparison.
///
/// Output order is deterministic and insertion-preserving: an existing key
/// keeps its first position (even when its value is overwritten), and new
/// keys append in incoming order. For [`MergePolicy::Set`] the output is
/// exactly the incoming list.
pub fn merge_properties(
    existing: &[Property],
    incoming: impl IntoIterator<Item = Property>,
    policy: MergePolicy,
) -> Vec<Property> {
    if policy == MergePolicy::Set {
        return incoming.into_iter().collect();
    }

    let mut merged: Vec<Property> = Vec::with_capacity(existing.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(existing.len());

    // Seed from the existing list. A duplicate key within the existing list
    // keeps its first position but takes the later pair's name and value.
    for property in existing {
        match index.entry(property.key()) {
            Entry::Occupied(slot) => merged[*slot.get()] = property.clone(),
            Entry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(property.clone());
            }
        }
    }

    for property in incoming {
        match index.entry(property.key()) {
            Entry::Occupied(slot) => {
                // The incoming pair wins wholesale under Merge: name casing
                // and value both come from the new pair.
                if policy == MergePolicy::Merge {
                    merged[*slot.get()] = property;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(merged.len());
                merged.push(property);
            }
        }
    }

    merged
}

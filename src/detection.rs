//! Inputs consumed by the enhancer: the detection engine's match result and
//! the capabilities an upstream layer already established.

use crate::strings::StringHandle;
use std::collections::{BTreeMap, HashMap};

/// Read-only view of one detection result.
///
/// Property and value handles come from the same string table the enhancer
/// was constructed with.
pub trait MatchResult {
    /// First (preferred) value of a property, or `None` when the engine has
    /// no opinion.
    fn first_value(&self, property: StringHandle) -> Option<StringHandle>;

    /// Every value of a property; empty when absent.
    fn all_values(&self, property: StringHandle) -> Vec<StringHandle>;

    /// Property handles carried by this result, used for summaries.
    fn property_handles(&self) -> Vec<StringHandle> {
        Vec::new()
    }

    fn confidence(&self) -> Option<i64> {
        None
    }

    fn difference(&self) -> Option<f64> {
        None
    }
}

/// Match result backed by an in-memory property map.
#[derive(Clone, Debug, Default)]
pub struct RecordedMatch {
    values: BTreeMap<StringHandle, Vec<StringHandle>>,
    confidence: Option<i64>,
    difference: Option<f64>,
}

impl RecordedMatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to a property, keeping insertion order.
    pub fn push(&mut self, property: StringHandle, value: StringHandle) {
        self.values.entry(property).or_default().push(value);
    }

    /// Replace all values of a property.
    pub fn set(&mut self, property: StringHandle, values: Vec<StringHandle>) {
        self.values.insert(property, values);
    }

    pub fn set_confidence(&mut self, confidence: Option<i64>) {
        self.confidence = confidence;
    }

    pub fn set_difference(&mut self, difference: Option<f64>) {
        self.difference = difference;
    }
}

impl MatchResult for RecordedMatch {
    fn first_value(&self, property: StringHandle) -> Option<StringHandle> {
        self.values.get(&property)?.first().copied()
    }

    fn all_values(&self, property: StringHandle) -> Vec<StringHandle> {
        self.values.get(&property).cloned().unwrap_or_default()
    }

    fn property_handles(&self) -> Vec<StringHandle> {
        self.values.keys().copied().collect()
    }

    fn confidence(&self) -> Option<i64> {
        self.confidence
    }

    fn difference(&self) -> Option<f64> {
        self.difference
    }
}

/// Capabilities established before the enhancer runs.
///
/// `None` covers both a missing key and an explicit null.
pub trait ExistingCapabilities {
    fn get(&self, key: &str) -> Option<&str>;
}

impl ExistingCapabilities for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

impl ExistingCapabilities for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl ExistingCapabilities for BTreeMap<String, Option<String>> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).and_then(|value| value.as_deref())
    }
}

/// No upstream layer ran.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapabilities;

impl ExistingCapabilities for NoCapabilities {
    fn get(&self, _key: &str) -> Option<&str> {
        None
    }
}

//! Raw device properties exposed next to the capability profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub const DETECTION_TIME_PROPERTY: &str = "DetectionTime";
pub const CONFIDENCE_PROPERTY: &str = "Confidence";
pub const DIFFERENCE_PROPERTY: &str = "Difference";

/// Every property of a match result, resolved to text and sorted by name.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceProperties {
    values: BTreeMap<String, Vec<String>>,
}

impl DeviceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.values.insert(name.into(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub(crate) fn record_detection_time(&mut self, elapsed: Duration) {
        // Rounded up so a sub-millisecond match never reports zero.
        let millis = elapsed.as_millis() + 1;
        self.insert(DETECTION_TIME_PROPERTY, vec![millis.to_string()]);
    }

    pub(crate) fn record_confidence(&mut self, confidence: i64) {
        self.insert(CONFIDENCE_PROPERTY, vec![confidence.to_string()]);
    }

    pub(crate) fn record_difference(&mut self, difference: f64) {
        self.insert(DIFFERENCE_PROPERTY, vec![format_difference(difference)]);
    }
}

/// Up to three decimals with trailing zeros removed.
pub fn format_difference(difference: f64) -> String {
    let fixed = format!("{difference:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

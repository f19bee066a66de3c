//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing wine reviews, per-group aggregates and tooltip payloads.

use serde::Deserialize;
use serde_json::Value;

/// Placeholder shown wherever a categorical field is missing from a review.
pub const MISSING_LABEL: &str = "Unknown";

/// One row of the review dataset.
///
/// Numeric fields are kept as raw JSON values because the dataset mixes
/// numbers and numeric strings; use [`crate::data::parse_number`] to read them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Review {
    /// Score given by the reviewer (usually 80-100)
    #[serde(default)]
    pub points: Option<Value>,
    /// Bottle price in dollars, absent for some reviews
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub region_1: Option<String>,
    #[serde(default)]
    pub winery: Option<String>,
}

impl Review {
    /// Display value of a categorical field, `Unknown` when missing.
    pub fn label(field: &Option<String>) -> String {
        field.clone().unwrap_or_else(|| MISSING_LABEL.to_string())
    }
}

/// A review whose score and price parsed successfully.
#[derive(Debug, Clone, Copy)]
pub struct ScoredReview<'a> {
    pub review: &'a Review,
    pub points: f64,
    pub price: f64,
}

/// Ordered label/value pairs shown when hovering a marker.
///
/// Inserting an existing label replaces its value in place, so the order of
/// first insertion is always kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TooltipData {
    entries: Vec<(String, String)>,
}

impl TooltipData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by the scene tooltip builders
    pub fn with(mut self, label: &str, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn insert(&mut self, label: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((label.to_string(), value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `label: value` line per entry, in order
    pub fn lines(&self) -> Vec<String> {
        self.iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect()
    }
}

/// The per-group summary produced by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAggregate {
    /// Value of the grouping field (`None` groups all reviews missing it)
    pub key: Option<String>,
    /// Scores of every contributing review, in input order
    pub points: Vec<f64>,
    /// Prices of every contributing review, in input order
    pub prices: Vec<f64>,
    /// Mean score formatted to two decimals
    pub average_points: String,
    /// Mean price formatted to two decimals
    pub average_price: String,
    /// Hover payload, always ending with the two average entries
    pub tooltip: TooltipData,
}

impl GroupAggregate {
    /// Data-space position of this group: (average price, average score).
    ///
    /// Reads the formatted averages back, so positions match what the tooltip shows.
    pub fn position(&self) -> (f64, f64) {
        let price = self.average_price.parse::<f64>().unwrap_or(f64::NAN);
        let points = self.average_points.parse::<f64>().unwrap_or(f64::NAN);
        (price, points)
    }
}

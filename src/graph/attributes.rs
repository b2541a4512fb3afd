//! Per-edge attribute storage

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_WEIGHT_KEY;

/// Weight reported for an edge that lacks the requested attribute
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Named numeric attributes attached to one directed edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttributes(HashMap<String, f64>);

impl EdgeAttributes {
    /// Empty attribute set; every weight lookup falls back to [`DEFAULT_WEIGHT`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute set holding a single value under the default `"weight"` key
    pub fn weighted(weight: f64) -> Self {
        Self::new().with(DEFAULT_WEIGHT_KEY, weight)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Weight under `key`, or [`DEFAULT_WEIGHT`] when the edge does not carry it
    pub fn weight(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(DEFAULT_WEIGHT)
    }

    /// Overwrite this edge's attributes with every entry of `other`
    pub fn merge(&mut self, other: EdgeAttributes) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

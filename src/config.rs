//! Configuration management for the role analyzer

use crate::error::{Result, RoleError};

/// Edge attribute read as the weight unless a caller asks for another one
pub const DEFAULT_WEIGHT_KEY: &str = "weight";

/// How reciprocal edges `u -> v` and `v -> u` collapse when direction is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndirectedMerge {
    /// The edge inserted last supplies the weight
    #[default]
    KeepLast,
    /// Weights of both directions are added
    Sum,
}

/// Default configuration for the role analyzer
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Edge attribute used as weight for community detection
    pub weight_key: String,

    /// Louvain resolution parameter (gamma)
    pub resolution: f64,

    /// Maximum local-moving sweeps per Louvain level
    pub max_iter: usize,

    /// Maximum Louvain aggregation levels
    pub max_levels: usize,

    /// Minimum modularity improvement for Louvain to keep aggregating
    pub min_modularity_gain: f64,

    /// Reciprocal edge policy for the undirected projection
    pub undirected_merge: UndirectedMerge,

    /// Node count from which participation coefficients are computed in parallel
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
            resolution: 1.0,
            max_iter: 100,
            max_levels: 10,
            min_modularity_gain: 1e-7,
            undirected_merge: UndirectedMerge::KeepLast,
            parallel_threshold: 1000,
        }
    }
}

impl Config {
    /// Create a new configuration with a custom weight key and resolution
    pub fn new(weight_key: impl Into<String>, resolution: f64) -> Self {
        Self {
            weight_key: weight_key.into(),
            resolution,
            ..Self::default()
        }
    }

    /// Check that every numeric setting is usable
    pub fn validate(&self) -> Result<()> {
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(RoleError::InvalidParameter {
                name: "resolution",
                message: "must be a positive finite number",
            });
        }
        if self.max_iter == 0 {
            return Err(RoleError::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        if self.max_levels == 0 {
            return Err(RoleError::InvalidParameter {
                name: "max_levels",
                message: "must be at least 1",
            });
        }
        if !self.min_modularity_gain.is_finite() || self.min_modularity_gain < 0.0 {
            return Err(RoleError::InvalidParameter {
                name: "min_modularity_gain",
                message: "must be a non-negative finite number",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.weight_key, "weight");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_resolution() {
        let config = Config::new("weight", 0.0);
        assert!(matches!(
            config.validate(),
            Err(RoleError::InvalidParameter { name: "resolution", .. })
        ));

        let config = Config::new("weight", f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        let config = Config {
            max_iter: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}

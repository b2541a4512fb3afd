//! Error types for the role analysis pipeline

use thiserror::Error;

/// Result alias used by the analysis stages
pub type Result<T> = std::result::Result<T, RoleError>;

/// Errors raised while detecting communities or computing node statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoleError {
    /// The community detector left a node without any membership
    #[error("community detector assigned no community to node {node}")]
    IncompletePartition {
        /// Debug rendering of the node identifier
        node: String,
    },

    /// The community detector failed on its own terms
    #[error("community detection failed: {0}")]
    Detection(String),

    /// A configuration value is out of range
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        message: &'static str,
    },

    /// A node was looked up that the graph does not contain
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

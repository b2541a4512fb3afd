//! Structural role analysis of weighted directed graphs
//!
//! Nodes are grouped into communities, then described by their
//! within-community degree z-score and their participation coefficient, and
//! finally mapped to one of the seven Guimerà–Amaral roles. Every stage is
//! memoized on the [`RoleGraph`] it runs on.
//!
//! ```
//! use std::sync::Arc;
//! use graph_role_analyzer::{RoleGraph, SilentObserver};
//!
//! let mut graph = RoleGraph::new().with_observer(Arc::new(SilentObserver));
//! graph.add_weighted_edge("a", "b", 1.0);
//! graph.add_weighted_edge("b", "c", 2.0);
//!
//! let roles = graph.roles("weight").unwrap();
//! assert_eq!(roles.len(), 3);
//! ```

pub mod community;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod observer;
pub mod roles;
pub mod stats;
pub mod storage;

pub use community::{Communities, CommunityDetection, FixedPartition, Louvain};
pub use config::{Config, UndirectedMerge, DEFAULT_WEIGHT_KEY};
pub use error::{Result, RoleError};
pub use graph::{EdgeAttributes, GraphBuilder, NodeKey, NodeMap, RoleGraph};
pub use observer::{LogObserver, ProgressObserver, SilentObserver, Stage};
pub use roles::Role;

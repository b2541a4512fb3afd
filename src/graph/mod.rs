//! Graph representation and attribute cache module

pub mod attributes;
pub mod builder;
pub(crate) mod cache;
pub mod store;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub use attributes::{EdgeAttributes, DEFAULT_WEIGHT};
pub use builder::GraphBuilder;
pub use store::RoleGraph;

/// Requirements on a node identifier
pub trait NodeKey: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> NodeKey for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Per-node result of a pipeline stage; a node without an entry has no defined value
pub type NodeMap<N, V> = HashMap<N, V>;

//! Directed weighted graph carrying its own analysis cache

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::community::{CommunityDetection, Louvain};
use crate::config::{Config, UndirectedMerge};
use crate::error::{Result, RoleError};
use crate::graph::attributes::EdgeAttributes;
use crate::graph::cache::{Memo, NodeAttributes, StageOutput};
use crate::graph::NodeKey;
use crate::observer::{LogObserver, ProgressObserver, Stage};

/// A directed weighted graph plus the memoized results of the role pipeline.
///
/// Stage methods (`communities`, `within_community_degrees`,
/// `participation_coefficients`, `roles`) compute on first use and return
/// the cached value afterwards. Any mutation through `add_node`/`add_edge`
/// drops every cached value; [`RoleGraph::invalidate`] does the same on demand.
pub struct RoleGraph<N: NodeKey> {
    graph: DiGraph<N, EdgeAttributes>,
    index: HashMap<N, NodeIndex>,
    config: Config,
    detector: Box<dyn CommunityDetection<N>>,
    observer: Arc<dyn ProgressObserver>,
    pub(crate) cache: NodeAttributes<N>,
}

impl<N: NodeKey> RoleGraph<N> {
    /// Empty graph with the default configuration, Louvain detection and log output
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            detector: Box::new(Louvain::from_config(&config)),
            config,
            observer: Arc::new(LogObserver),
            cache: NodeAttributes::new(),
        }
    }

    /// Empty graph using a validated custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: Box::new(Louvain::from_config(&config)),
            config,
            ..Self::new()
        })
    }

    /// Replace the community detector
    pub fn with_detector<D>(mut self, detector: D) -> Self
    where
        D: CommunityDetection<N> + 'static,
    {
        self.detector = Box::new(detector);
        self.invalidate();
        self
    }

    /// Replace the progress observer
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.index.contains_key(id)
    }

    /// Node identifiers in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.graph.node_weights()
    }

    /// Insert a node if absent and return its index
    pub fn add_node(&mut self, id: N) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }

        self.invalidate();
        self.insert_node(id)
    }

    /// Add a directed edge, creating missing endpoints.
    ///
    /// An existing `src -> dst` edge keeps its identity and has `attrs` merged into it.
    pub fn add_edge(&mut self, src: N, dst: N, attrs: EdgeAttributes) {
        self.invalidate();
        self.insert_edge(src, dst, attrs);
    }

    /// `add_node` without touching the cache, for bulk loading a fresh graph
    pub(crate) fn insert_node(&mut self, id: N) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id, idx);
        idx
    }

    /// `add_edge` without touching the cache, for bulk loading a fresh graph
    pub(crate) fn insert_edge(&mut self, src: N, dst: N, attrs: EdgeAttributes) {
        let src_idx = self.insert_node(src);
        let dst_idx = self.insert_node(dst);

        match self.graph.find_edge(src_idx, dst_idx) {
            Some(edge) => self.graph[edge].merge(attrs),
            None => {
                self.graph.add_edge(src_idx, dst_idx, attrs);
            }
        }
    }

    /// Add a directed edge whose only attribute is `"weight"`
    pub fn add_weighted_edge(&mut self, src: N, dst: N, weight: f64) {
        self.add_edge(src, dst, EdgeAttributes::weighted(weight));
    }

    /// Attributes of the `src -> dst` edge
    pub fn edge(&self, src: &N, dst: &N) -> Result<Option<&EdgeAttributes>> {
        let src_idx = self.node_index(src)?;
        let dst_idx = self.node_index(dst)?;
        Ok(self
            .graph
            .find_edge(src_idx, dst_idx)
            .map(|edge| &self.graph[edge]))
    }

    pub(crate) fn node_index(&self, id: &N) -> Result<NodeIndex> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| RoleError::UnknownNode(format!("{:?}", id)))
    }

    pub(crate) fn digraph(&self) -> &DiGraph<N, EdgeAttributes> {
        &self.graph
    }

    pub(crate) fn detector(&self) -> &dyn CommunityDetection<N> {
        self.detector.as_ref()
    }

    /// Drop every memoized stage result
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Undirected projection used for community detection.
    ///
    /// Node indices match the directed graph. Edges are visited grouped by
    /// source node in insertion order, and reciprocal edges collapse into one
    /// edge following `Config::undirected_merge`. Weights are read under
    /// `Config::weight_key`.
    ///
    /// With `KeepLast`, a later edge only replaces the weight when it carries
    /// the key itself, so the default weight applies only when neither
    /// direction does.
    pub fn to_undirected(&self) -> UnGraph<N, f64> {
        let mut projection =
            UnGraph::with_capacity(self.graph.node_count(), self.graph.edge_count());
        for id in self.graph.node_weights() {
            projection.add_node(id.clone());
        }

        let key = self.config.weight_key.as_str();
        let mut merged = HashMap::with_capacity(self.graph.edge_count());
        for source in self.graph.node_indices() {
            for edge in self.graph.edges_directed(source, Direction::Outgoing) {
                let (a, b) = (edge.source(), edge.target());
                let pair = if a <= b { (a, b) } else { (b, a) };
                let attrs = edge.weight();

                match merged.get(&pair) {
                    Some(&existing) => match self.config.undirected_merge {
                        UndirectedMerge::KeepLast => {
                            if let Some(weight) = attrs.get(key) {
                                projection[existing] = weight;
                            }
                        }
                        UndirectedMerge::Sum => projection[existing] += attrs.weight(key),
                    },
                    None => {
                        let weight = attrs.weight(key);
                        merged.insert(pair, projection.add_edge(pair.0, pair.1, weight));
                    }
                }
            }
        }

        projection
    }

    /// Look up `key` in `memo`, computing with progress notifications on a miss
    pub(crate) fn memoized<K, T, F>(
        &self,
        memo: &Memo<K, T>,
        key: K,
        stage: Stage,
        compute: F,
    ) -> Result<Arc<T>>
    where
        K: PartialEq,
        T: StageOutput,
        F: FnOnce() -> Result<T>,
    {
        memo.get_or_try_insert_with(key, || {
            self.observer.stage_started(stage);
            let started = Instant::now();
            let value = compute()?;
            self.observer
                .stage_finished(stage, value.entries(), started.elapsed());
            Ok(value)
        })
    }
}

impl<N: NodeKey> Default for RoleGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeKey> fmt::Debug for RoleGraph<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleGraph")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .field("config", &self.config)
            .finish()
    }
}

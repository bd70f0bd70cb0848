use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::MovieNodeSet;
use crate::errors::DashboardError;
use crate::graph::category::{
    display_label, Classifier, NodeCategory, DEFAULT_LABEL_MAX, DEFAULT_USER_PREFIX,
};
use crate::graph::KnowledgeGraph;

pub const DEFAULT_CENTER: &str = "User_1";
pub const DEFAULT_FIRST_HOP: &str = "rated";
pub const DEFAULT_SECOND_HOP: &str = "belongs_to";

/// Query trait implemented by all query types.
///
/// Given an immutable reference to a `KnowledgeGraph`, returns a result of type `R`.
pub trait Query<R> {
    fn run(&self, graph: &KnowledgeGraph) -> R;
}

/// What to do when the requested center node is not in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CenterFallback {
    /// Substitute the lexicographically smallest node key.
    #[default]
    Smallest,
    /// Report `CenterNotFound`.
    Fail,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectedNode {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProjectedEdge {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// Display-ready neighborhood: nodes sorted by key, edges in graph order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Projection {
    pub center: String,
    /// True when `center` replaced a requested node that was absent.
    pub center_substituted: bool,
    pub nodes: Vec<ProjectedNode>,
    pub edges: Vec<ProjectedEdge>,
}

impl Projection {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&ProjectedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }
}

/// Two-hop neighborhood around a center node, projected for rendering.
///
/// The first hop follows edges labelled `first_hop` out of the center, the
/// second follows `second_hop` out of each first-hop node. The result is the
/// induced subgraph on the collected nodes, so edges with other labels between
/// selected nodes are kept too.
#[derive(Debug, Clone)]
pub struct NeighborhoodQuery<'a> {
    pub center: String,
    pub first_hop: String,
    pub second_hop: String,
    pub fallback: CenterFallback,
    pub user_prefix: String,
    pub label_max: usize,
    pub movies: &'a MovieNodeSet,
}

impl<'a> NeighborhoodQuery<'a> {
    /// Query with the default center, relation labels, and display bounds.
    #[must_use]
    pub fn new(movies: &'a MovieNodeSet) -> Self {
        Self {
            center: DEFAULT_CENTER.to_string(),
            first_hop: DEFAULT_FIRST_HOP.to_string(),
            second_hop: DEFAULT_SECOND_HOP.to_string(),
            fallback: CenterFallback::default(),
            user_prefix: DEFAULT_USER_PREFIX.to_string(),
            label_max: DEFAULT_LABEL_MAX,
            movies,
        }
    }

    #[must_use]
    pub fn with_center(mut self, center: &str) -> Self {
        self.center = center.to_string();
        self
    }

    fn resolve_center<'g>(
        &self,
        graph: &'g KnowledgeGraph,
    ) -> Result<(&'g str, bool), DashboardError> {
        if let Some(found) = graph.node(&self.center) {
            return Ok((found, false));
        }
        let Some(smallest) = graph.smallest_node() else {
            return Err(DashboardError::EmptyGraph);
        };
        match self.fallback {
            CenterFallback::Fail => Err(DashboardError::CenterNotFound(self.center.clone())),
            CenterFallback::Smallest => {
                tracing::warn!(
                    requested = %self.center,
                    substitute = %smallest,
                    "center node not in graph; using smallest node key"
                );
                Ok((smallest, true))
            }
        }
    }

    fn collect<'g>(&self, graph: &'g KnowledgeGraph, center: &'g str) -> HashSet<&'g str> {
        let mut selected: HashSet<&str> = HashSet::new();
        selected.insert(center);
        for movie in graph.successors(center) {
            if !graph.has_labeled_edge(center, movie, &self.first_hop) {
                continue;
            }
            selected.insert(movie);
            for genre in graph.successors(movie) {
                if graph.has_labeled_edge(movie, genre, &self.second_hop) {
                    selected.insert(genre);
                }
            }
        }
        selected
    }
}

impl Query<Result<Projection, DashboardError>> for NeighborhoodQuery<'_> {
    fn run(&self, graph: &KnowledgeGraph) -> Result<Projection, DashboardError> {
        if graph.is_empty() {
            return Err(DashboardError::EmptyGraph);
        }
        let (center, center_substituted) = self.resolve_center(graph)?;
        let selected = self.collect(graph, center);

        let classifier = Classifier::new(&self.user_prefix, self.movies);
        let mut ids: Vec<&str> = selected.iter().copied().collect();
        ids.sort_unstable();
        let nodes: Vec<ProjectedNode> = ids
            .into_iter()
            .map(|id| ProjectedNode {
                id: id.to_string(),
                label: display_label(id, self.label_max),
                category: classifier.classify(id),
            })
            .collect();
        let edges: Vec<ProjectedEdge> = graph
            .induced_edges(&selected)
            .into_iter()
            .map(|e| ProjectedEdge {
                from: e.source.clone(),
                to: e.target.clone(),
                label: e.label.clone(),
            })
            .collect();

        tracing::debug!(
            center,
            nodes = nodes.len(),
            edges = edges.len(),
            "projected neighborhood"
        );
        Ok(Projection { center: center.to_string(), center_substituted, nodes, edges })
    }
}

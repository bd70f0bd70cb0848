//! Directed labeled multigraph for the user-movie-genre knowledge graph.
//!
//! The graph is produced offline and only read here. `KnowledgeGraph` keeps
//! nodes in insertion order, edges in file order, and an out-edge index per
//! node so that successor and parallel-edge lookups stay cheap.
//!
//! On disk the graph uses the node-link layout common to graph libraries:
//! ```json
//! {"directed": true, "multigraph": true,
//!  "nodes": [{"id": "User_1"}, {"id": "Movie_X"}],
//!  "links": [{"source": "User_1", "target": "Movie_X", "label": "rated"}]}
//! ```
//! `edges` is accepted as an alias for `links`.
use crate::errors::DashboardError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

pub mod category;

/// A single labeled edge. Parallel edges between the same ordered pair are allowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeRecord {
    id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphDocument {
    #[serde(default = "default_true")]
    directed: bool,
    #[serde(default = "default_true")]
    multigraph: bool,
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default, alias = "edges")]
    links: Vec<Edge>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct KnowledgeGraph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    index: HashMap<String, usize>,
    // Out-edge indices into `edges`, one list per node position
    out_edges: Vec<Vec<usize>>,
}

impl From<GraphDocument> for KnowledgeGraph {
    fn from(doc: GraphDocument) -> Self {
        let mut graph = KnowledgeGraph::new();
        for node in doc.nodes {
            graph.add_node(&node.id);
        }
        for edge in doc.links {
            graph.add_edge(&edge.source, &edge.target, &edge.label);
        }
        graph
    }
}

impl From<KnowledgeGraph> for GraphDocument {
    fn from(graph: KnowledgeGraph) -> Self {
        GraphDocument {
            directed: true,
            multigraph: true,
            nodes: graph.nodes.into_iter().map(|id| NodeRecord { id }).collect(),
            links: graph.edges,
        }
    }
}

impl KnowledgeGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node if it is not present yet. Returns its position.
    pub fn add_node(&mut self, id: &str) -> usize {
        if let Some(&pos) = self.index.get(id) {
            return pos;
        }
        let pos = self.nodes.len();
        self.nodes.push(id.to_string());
        self.index.insert(id.to_string(), pos);
        self.out_edges.push(Vec::new());
        pos
    }

    /// Append an edge; missing endpoints are created.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) {
        let from = self.add_node(source);
        self.add_node(target);
        self.out_edges[from].push(self.edges.len());
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
        });
    }

    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The graph-owned key equal to `id`, if present.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&str> {
        self.index.get(id).map(|&pos| self.nodes[pos].as_str())
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node keys in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Lexicographically smallest node key, if any.
    #[must_use]
    pub fn smallest_node(&self) -> Option<&str> {
        self.nodes.iter().map(String::as_str).min()
    }

    /// Distinct direct successors of `id`, in order of first outgoing edge.
    #[must_use]
    pub fn successors(&self, id: &str) -> Vec<&str> {
        let Some(&pos) = self.index.get(id) else {
            return Vec::new();
        };
        let mut seen: HashSet<&str> = HashSet::new();
        let mut out = Vec::new();
        for &e in &self.out_edges[pos] {
            let target = self.edges[e].target.as_str();
            if seen.insert(target) {
                out.push(target);
            }
        }
        out
    }

    /// All parallel edges from `source` to `target`.
    pub fn edges_between<'a>(
        &'a self,
        source: &str,
        target: &'a str,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        let list: &[usize] = match self.index.get(source) {
            Some(&pos) => &self.out_edges[pos],
            None => &[],
        };
        list.iter().map(|&e| &self.edges[e]).filter(move |edge| edge.target == target)
    }

    /// True when any parallel edge `source -> target` carries `label`.
    #[must_use]
    pub fn has_labeled_edge(&self, source: &str, target: &str, label: &str) -> bool {
        self.edges_between(source, target).any(|e| e.label == label)
    }

    /// Every edge whose endpoints both lie in `selected`, in graph order.
    #[must_use]
    pub fn induced_edges(&self, selected: &HashSet<&str>) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| {
                selected.contains(e.source.as_str()) && selected.contains(e.target.as_str())
            })
            .collect()
    }

    /// Save the graph as pretty-printed node-link JSON.
    ///
    /// # Errors
    /// Returns `DashboardError::Io` if serialization or writing the file fails.
    pub fn save_json(&self, path: &Path) -> Result<(), DashboardError> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::Io(std::io::Error::other(e.to_string())))?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Load a graph from a node-link JSON file.
    ///
    /// # Errors
    /// `MissingInputFile` if the file cannot be read, `InvalidInput` if it is not a graph document.
    pub fn load_json(path: &Path) -> Result<Self, DashboardError> {
        let graph: KnowledgeGraph = crate::utils::json::read_json(path)?;
        tracing::debug!(
            path = %path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "loaded knowledge graph"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new();
        g.add_edge("User_1", "Movie_X", "rated");
        g.add_edge("User_1", "Movie_X", "watched");
        g.add_edge("User_1", "Movie_Y", "rated");
        g.add_edge("Movie_X", "Genre_Y", "belongs_to");
        g
    }

    #[test]
    fn add_edge_creates_missing_endpoints_once() {
        let g = sample();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["User_1", "Movie_X", "Movie_Y", "Genre_Y"]);
    }

    #[test]
    fn successors_are_distinct_despite_parallel_edges() {
        let g = sample();
        assert_eq!(g.successors("User_1"), vec!["Movie_X", "Movie_Y"]);
        assert!(g.successors("Genre_Y").is_empty());
        assert!(g.successors("nope").is_empty());
    }

    #[test]
    fn labeled_edge_lookup_checks_every_parallel_edge() {
        let g = sample();
        assert_eq!(g.edges_between("User_1", "Movie_X").count(), 2);
        assert!(g.has_labeled_edge("User_1", "Movie_X", "watched"));
        assert!(g.has_labeled_edge("User_1", "Movie_X", "rated"));
        assert!(!g.has_labeled_edge("User_1", "Movie_Y", "watched"));
        assert!(!g.has_labeled_edge("Movie_X", "User_1", "rated"));
    }

    #[test]
    fn induced_edges_keep_any_label_between_selected_nodes() {
        let g = sample();
        let sel: HashSet<&str> = ["User_1", "Movie_X"].into_iter().collect();
        let labels: Vec<&str> = g.induced_edges(&sel).iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["rated", "watched"]);
    }

    #[test]
    fn node_lookup_goes_through_the_index() {
        let g = sample();
        assert_eq!(g.node("Movie_Y"), Some("Movie_Y"));
        assert_eq!(g.node("Movie_Q"), None);
    }

    #[test]
    fn smallest_node_is_lexicographic() {
        let g = sample();
        assert_eq!(g.smallest_node(), Some("Genre_Y"));
        assert_eq!(KnowledgeGraph::new().smallest_node(), None);
    }

    #[test]
    fn json_accepts_links_or_edges_and_missing_labels() {
        let with_links = r#"{"nodes":[{"id":"a"},{"id":"b"}],"links":[{"source":"a","target":"b","label":"rated","key":0}]}"#;
        let g: KnowledgeGraph = serde_json::from_str(with_links).unwrap();
        assert!(g.has_labeled_edge("a", "b", "rated"));

        let with_edges = r#"{"nodes":[],"edges":[{"source":"a","target":"c"}]}"#;
        let g: KnowledgeGraph = serde_json::from_str(with_edges).unwrap();
        assert!(g.contains_node("c"));
        assert_eq!(g.edges()[0].label, "");
    }

    #[test]
    fn save_then_load_preserves_structure() {
        let td = tempdir().unwrap();
        let path = td.path().join("kg.json");
        let g = sample();
        g.save_json(&path).unwrap();
        let back = KnowledgeGraph::load_json(&path).unwrap();
        assert_eq!(back.nodes().collect::<Vec<_>>(), g.nodes().collect::<Vec<_>>());
        assert_eq!(back.edges(), g.edges());
    }

    #[test]
    fn load_json_classifies_missing_and_invalid_files() {
        let td = tempdir().unwrap();
        let missing = td.path().join("absent.json");
        assert!(matches!(
            KnowledgeGraph::load_json(&missing),
            Err(DashboardError::MissingInputFile { .. })
        ));
        let bad = td.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert!(matches!(
            KnowledgeGraph::load_json(&bad),
            Err(DashboardError::InvalidInput { .. })
        ));
    }
}

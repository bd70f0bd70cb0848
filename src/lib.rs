//! movie-kg-dashboard: hybrid GNN + LLM recommendation dashboard
//!
//! Reads precomputed recommendation results and a user-movie-genre knowledge
//! graph from JSON files, and renders them as a self-contained HTML dashboard.
//!
//! # Features
//! - Two-hop neighborhood projection (`rated` then `belongs_to`) with induced-subgraph edges
//! - Node categories (user, movie, genre) derived from node keys
//! - Interactive network (vis-network), DOT, and JSON outputs for the neighborhood
//! - Recommendations panel with per-movie descriptions and evaluation scores
//!
//! # Quickstart (Library)
//! ```no_run
//! use movie_kg_dashboard::catalog::MovieNodeSet;
//! use movie_kg_dashboard::graph::KnowledgeGraph;
//! use movie_kg_dashboard::query::{NeighborhoodQuery, Query};
//!
//! let graph = KnowledgeGraph::load_json(std::path::Path::new("knowledge_graph.json"))
//!     .expect("load graph");
//! let movies = MovieNodeSet::load_json(std::path::Path::new("movie_nodes.json"))
//!     .expect("load movies");
//! let projection = NeighborhoodQuery::new(&movies).run(&graph).expect("project");
//! println!("nodes: {} edges: {}", projection.nodes.len(), projection.edges.len());
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! movie-kg-dashboard render --data-dir data --out dashboard.html
//! movie-kg-dashboard neighborhood --data-dir data --center User_1 --format json
//! ```
pub mod app;
pub mod catalog;
pub mod cli;
pub mod errors;
pub mod graph;
pub mod query;
pub mod utils;
pub mod visualization;

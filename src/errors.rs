use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Missing input file {path}: {source}")]
    MissingInputFile { path: PathBuf, source: std::io::Error },

    #[error("Invalid input file {path}: {message}")]
    InvalidInput { path: PathBuf, message: String },

    #[error("Graph has no nodes")]
    EmptyGraph,

    #[error("Center node not found in graph: {0}")]
    CenterNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

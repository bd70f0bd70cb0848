//! Precomputed recommendation data: the ranked list for one user, the
//! evaluation scores, and the set of node keys that denote movies.
//!
//! `DashboardContext` bundles the records the page cannot render without. It
//! is loaded once and handed by reference to the renderer.
use crate::errors::DashboardError;
use crate::utils::json::read_json;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub const NO_DESCRIPTION: &str = "No description available.";

pub const DEFAULT_RECOMMENDATIONS_FILE: &str = "hybrid_recommendations.json";
pub const DEFAULT_EVALUATION_FILE: &str = "evaluation_results.json";
pub const DEFAULT_GRAPH_FILE: &str = "knowledge_graph.json";
pub const DEFAULT_MOVIES_FILE: &str = "movie_nodes.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecommendationRecord {
    pub user_id: String,
    /// Rank order, most relevant first.
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub movie_descriptions: HashMap<String, String>,
}

impl RecommendationRecord {
    /// Description for `movie`, or the placeholder when none was produced.
    #[must_use]
    pub fn description_for(&self, movie: &str) -> &str {
        self.movie_descriptions.get(movie).map_or(NO_DESCRIPTION, String::as_str)
    }

    /// `(rank, movie, description)` in rank order, ranks starting at 1.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.recommendations
            .iter()
            .enumerate()
            .map(|(i, m)| (i + 1, m.as_str(), self.description_for(m)))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct EvaluationRecord {
    /// Precision@10 of the hybrid model.
    pub mean_hybrid: f64,
    /// Precision@10 of the GNN-only model.
    pub mean_gcn: f64,
}

/// Node keys that count as movies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieNodeSet(HashSet<String>);

impl MovieNodeSet {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Load a JSON array of strings.
    ///
    /// # Errors
    /// `MissingInputFile` or `InvalidInput` per `read_json`.
    pub fn load_json(path: &Path) -> Result<Self, DashboardError> {
        let keys: Vec<String> = read_json(path)?;
        tracing::debug!(path = %path.display(), movies = keys.len(), "loaded movie node set");
        Ok(Self::new(keys))
    }
}

/// Locations of the four input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub recommendations: PathBuf,
    pub evaluation: PathBuf,
    pub graph: PathBuf,
    pub movies: PathBuf,
}

impl InputPaths {
    /// Default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            recommendations: dir.join(DEFAULT_RECOMMENDATIONS_FILE),
            evaluation: dir.join(DEFAULT_EVALUATION_FILE),
            graph: dir.join(DEFAULT_GRAPH_FILE),
            movies: dir.join(DEFAULT_MOVIES_FILE),
        }
    }
}

/// Records the dashboard needs before anything can be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardContext {
    pub recommendations: RecommendationRecord,
    pub evaluation: EvaluationRecord,
}

impl DashboardContext {
    /// Load the recommendation and evaluation records.
    ///
    /// # Errors
    /// Any failure here is fatal for the page: `MissingInputFile` or `InvalidInput`.
    pub fn load(paths: &InputPaths) -> Result<Self, DashboardError> {
        let recommendations: RecommendationRecord = read_json(&paths.recommendations)?;
        let evaluation: EvaluationRecord = read_json(&paths.evaluation)?;
        tracing::info!(
            user = %recommendations.user_id,
            count = recommendations.recommendations.len(),
            "loaded recommendations"
        );
        Ok(Self { recommendations, evaluation })
    }
}

//! Display category of a graph node, derived from its key.
use crate::catalog::MovieNodeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_USER_PREFIX: &str = "User_";
pub const DEFAULT_LABEL_MAX: usize = 25;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    User,
    Movie,
    Genre,
}

impl NodeCategory {
    pub const ALL: [NodeCategory; 3] =
        [NodeCategory::User, NodeCategory::Movie, NodeCategory::Genre];

    /// Title shown as the node tooltip.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            NodeCategory::User => "User",
            NodeCategory::Movie => "Movie",
            NodeCategory::Genre => "Genre",
        }
    }

    /// Fill colour used by every renderer.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            NodeCategory::User => "#FFA500",
            NodeCategory::Movie => "#4682B4",
            NodeCategory::Genre => "#32CD32",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeCategory::User => "user",
            NodeCategory::Movie => "movie",
            NodeCategory::Genre => "genre",
        })
    }
}

/// Classifies node keys. The user prefix wins over movie membership; anything else is a genre.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    user_prefix: &'a str,
    movies: &'a MovieNodeSet,
}

impl<'a> Classifier<'a> {
    #[must_use]
    pub fn new(user_prefix: &'a str, movies: &'a MovieNodeSet) -> Self {
        Self { user_prefix, movies }
    }

    #[must_use]
    pub fn classify(&self, key: &str) -> NodeCategory {
        if key.starts_with(self.user_prefix) {
            NodeCategory::User
        } else if self.movies.contains(key) {
            NodeCategory::Movie
        } else {
            NodeCategory::Genre
        }
    }
}

/// Truncate `key` to `max` characters, appending `...` when anything was cut.
#[must_use]
pub fn display_label(key: &str, max: usize) -> String {
    match key.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &key[..cut]),
        None => key.to_string(),
    }
}

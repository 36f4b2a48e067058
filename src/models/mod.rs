use serde::{Deserialize, Serialize};

pub mod ratings_matrix;

pub use ratings_matrix::{MatrixSummary, RatingsMatrix, UNRATED};

/// Predicted rating for a movie the target user has not rated yet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// 0-based column index of the movie
    pub movie_index: usize,
    pub predicted_score: f64,
}

impl Recommendation {
    pub fn new(movie_index: usize, predicted_score: f64) -> Self {
        Self {
            movie_index,
            predicted_score,
        }
    }
}

/// Ranked recommendations for one user, as handed to reporting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    /// 0-based index of the user the list was computed for
    pub target_user: usize,
    /// Requested list length; `recommendations` may be shorter
    pub top_n: usize,
    pub recommendations: Vec<Recommendation>,
}

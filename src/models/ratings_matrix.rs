use serde::Serialize;

use crate::error::RecommendError;

/// Rating value meaning "the user has not rated this movie"
pub const UNRATED: u32 = 0;

/// Dense user × movie ratings matrix
///
/// Rows are users, columns are movies. A zero cell means the movie is unrated;
/// any positive value is an explicit rating used as an opaque weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingsMatrix {
    rows: Vec<Vec<u32>>,
    movie_count: usize,
}

/// Shape summary of a loaded matrix
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatrixSummary {
    pub user_count: usize,
    pub movie_count: usize,
    pub density: f64,
}

impl RatingsMatrix {
    /// Builds a matrix from user rows, rejecting empty or ragged input
    pub fn new(rows: Vec<Vec<u32>>) -> Result<Self, RecommendError> {
        let Some(first) = rows.first() else {
            return Err(RecommendError::EmptyDataset);
        };

        let movie_count = first.len();
        if movie_count == 0 {
            return Err(RecommendError::MalformedRow {
                row: 0,
                expected: 1,
                found: 0,
            });
        }

        // Ragged rows are rejected rather than padded
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != movie_count)
        {
            return Err(RecommendError::MalformedRow {
                row,
                expected: movie_count,
                found,
            });
        }

        Ok(Self { rows, movie_count })
    }

    pub fn user_count(&self) -> usize {
        self.rows.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movie_count
    }

    /// Rating given by `user` to `movie`, 0 when unrated
    pub fn rating(&self, user: usize, movie: usize) -> u32 {
        self.rows[user][movie]
    }

    /// Full rating vector of one user
    pub fn row(&self, user: usize) -> &[u32] {
        &self.rows[user]
    }

    /// Number of movies the user has rated
    pub fn rated_count(&self, user: usize) -> usize {
        self.rows[user].iter().filter(|&&r| r != UNRATED).count()
    }

    /// Fraction of cells holding an explicit rating
    pub fn density(&self) -> f64 {
        let rated: usize = (0..self.user_count()).map(|u| self.rated_count(u)).sum();
        rated as f64 / (self.user_count() * self.movie_count) as f64
    }

    pub fn summary(&self) -> MatrixSummary {
        MatrixSummary {
            user_count: self.user_count(),
            movie_count: self.movie_count,
            density: self.density(),
        }
    }
}

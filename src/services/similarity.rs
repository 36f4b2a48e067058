use crate::models::{RatingsMatrix, UNRATED};

/// Cosine similarity between two users' rating vectors
///
/// Only co-rated movies (non-zero in both vectors) contribute to the dot
/// product and to both norms. Users with no overlap get a similarity of
/// exactly `0.0`. The result is not clamped.
pub fn cosine_similarity(a: &[u32], b: &[u32]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "rating vectors must have equal length");

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b) {
        if x != UNRATED && y != UNRATED {
            let (x, y) = (f64::from(x), f64::from(y));
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Precomputed user × user similarities
///
/// Useful when recommendations are needed for many target users of the same
/// matrix. The diagonal is never consulted and is stored as 0.0. The shape of
/// the source matrix is kept so predictions can reject a table built from
/// ratings of a different size.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    user_count: usize,
    movie_count: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes similarities for every user pair, O(users² × movies)
    pub fn compute(matrix: &RatingsMatrix) -> Self {
        let user_count = matrix.user_count();
        let mut values = vec![0.0; user_count * user_count];

        for a in 0..user_count {
            for b in (a + 1)..user_count {
                let s = cosine_similarity(matrix.row(a), matrix.row(b));
                values[a * user_count + b] = s;
                values[b * user_count + a] = s;
            }
        }

        tracing::debug!(users = user_count, "Similarity matrix computed");

        Self {
            user_count,
            movie_count: matrix.movie_count(),
            values,
        }
    }

    pub fn user_count(&self) -> usize {
        self.user_count
    }

    /// Number of movies in the ratings the table was computed from
    pub fn movie_count(&self) -> usize {
        self.movie_count
    }

    pub fn get(&self, a: usize, b: usize) -> f64 {
        self.values[a * self.user_count + b]
    }
}

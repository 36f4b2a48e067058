use std::sync::Arc;

use crate::{config::Config, models::RatingsMatrix};

/// Shared application state
///
/// The ratings matrix is immutable once loaded, so handlers read it
/// concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    pub matrix: Arc<RatingsMatrix>,
    /// Used when a request does not specify `top_n`
    pub default_top_n: usize,
    pub score_precision: usize,
}

impl AppState {
    pub fn new(matrix: RatingsMatrix, default_top_n: usize, score_precision: usize) -> Self {
        Self {
            matrix: Arc::new(matrix),
            default_top_n,
            score_precision,
        }
    }

    pub fn from_config(matrix: RatingsMatrix, config: &Config) -> Self {
        Self::new(matrix, config.top_n, config.score_precision)
    }
}

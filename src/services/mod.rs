pub mod ingestion;
pub mod predictor;
pub mod report;
pub mod similarity;

pub use predictor::{predict, Predictor};
pub use similarity::{cosine_similarity, SimilarityMatrix};

use std::cmp::Ordering;

use crate::{
    error::RecommendError,
    models::{RatingsMatrix, Recommendation, RecommendationSet, UNRATED},
    services::similarity::{cosine_similarity, SimilarityMatrix},
};

/// User-based collaborative filtering over a ratings matrix
pub struct Predictor<'a> {
    matrix: &'a RatingsMatrix,
}

impl<'a> Predictor<'a> {
    pub fn new(matrix: &'a RatingsMatrix) -> Self {
        Self { matrix }
    }

    /// Predicts the `top_n` best unseen movies for `target_user`
    ///
    /// Every other user contributes their ratings weighted by their cosine
    /// similarity to the target. Movies that receive no weight at all are left
    /// out rather than given a made-up score. Results are ordered by score,
    /// highest first, with ties kept in movie order.
    pub fn predict(
        &self,
        target_user: usize,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        self.check_user(target_user)?;

        let target = self.matrix.row(target_user);
        Ok(self.rank(target_user, top_n, |other| {
            cosine_similarity(target, self.matrix.row(other))
        }))
    }

    /// Same as [`Predictor::predict`], reading similarities from a precomputed matrix
    ///
    /// `similarities` must have been computed from this predictor's ratings
    /// matrix. A table of a different shape is rejected; a table computed from
    /// other ratings of the same shape cannot be detected and yields scores
    /// for those other ratings.
    pub fn predict_with_similarities(
        &self,
        similarities: &SimilarityMatrix,
        target_user: usize,
        top_n: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        self.check_user(target_user)?;

        if similarities.user_count() != self.matrix.user_count()
            || similarities.movie_count() != self.matrix.movie_count()
        {
            return Err(RecommendError::SimilarityShapeMismatch {
                expected_users: self.matrix.user_count(),
                expected_movies: self.matrix.movie_count(),
                found_users: similarities.user_count(),
                found_movies: similarities.movie_count(),
            });
        }

        Ok(self.rank(target_user, top_n, |other| {
            similarities.get(target_user, other)
        }))
    }

    /// Runs [`Predictor::predict`] and packages the result for reporting
    pub fn recommend(
        &self,
        target_user: usize,
        top_n: usize,
    ) -> Result<RecommendationSet, RecommendError> {
        let recommendations = self.predict(target_user, top_n)?;
        Ok(RecommendationSet {
            target_user,
            top_n,
            recommendations,
        })
    }

    fn check_user(&self, target_user: usize) -> Result<(), RecommendError> {
        if target_user >= self.matrix.user_count() {
            return Err(RecommendError::UserIndexOutOfRange {
                user: target_user,
                user_count: self.matrix.user_count(),
            });
        }
        Ok(())
    }

    fn rank<F>(&self, target_user: usize, top_n: usize, similarity: F) -> Vec<Recommendation>
    where
        F: Fn(usize) -> f64,
    {
        let movie_count = self.matrix.movie_count();
        let target = self.matrix.row(target_user);

        let mut predicted_sum = vec![0.0_f64; movie_count];
        let mut weight_sum = vec![0.0_f64; movie_count];

        for other_user in (0..self.matrix.user_count()).filter(|&u| u != target_user) {
            let s = similarity(other_user);
            let other = self.matrix.row(other_user);

            for movie in 0..movie_count {
                if target[movie] == UNRATED && other[movie] != UNRATED {
                    predicted_sum[movie] += s * f64::from(other[movie]);
                    weight_sum[movie] += s.abs();
                }
            }
        }

        let mut recommendations: Vec<Recommendation> = (0..movie_count)
            .filter(|&movie| target[movie] == UNRATED && weight_sum[movie] != 0.0)
            .map(|movie| Recommendation::new(movie, predicted_sum[movie] / weight_sum[movie]))
            .collect();

        let unrated = target.iter().filter(|&&r| r == UNRATED).count();
        tracing::debug!(
            target_user,
            eligible = recommendations.len(),
            coverage_gaps = unrated - recommendations.len(),
            "Predicted ratings"
        );

        // Stable sort: equal scores keep ascending movie order
        recommendations.sort_by(|a, b| {
            b.predicted_score
                .partial_cmp(&a.predicted_score)
                .unwrap_or(Ordering::Equal)
        });
        recommendations.truncate(top_n);
        recommendations
    }
}

/// Convenience wrapper around [`Predictor::predict`]
pub fn predict(
    matrix: &RatingsMatrix,
    target_user: usize,
    top_n: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
    Predictor::new(matrix).predict(target_user, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matrix(rows: Vec<Vec<u32>>) -> RatingsMatrix {
        RatingsMatrix::new(rows).unwrap()
    }

    #[test]
    fn test_coverage_gap_scenario_is_empty() {
        let m = matrix(vec![vec![5, 0, 4], vec![4, 0, 5], vec![0, 5, 0]]);
        let result = predict(&m, 0, 2).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_out_of_range_user() {
        let m = matrix(vec![vec![5, 0, 4], vec![4, 0, 5], vec![0, 5, 0]]);
        let result = predict(&m, 3, 2);
        assert_eq!(
            result,
            Err(RecommendError::UserIndexOutOfRange {
                user: 3,
                user_count: 3
            })
        );
    }

    #[test]
    fn test_zero_top_n_is_empty() {
        let m = matrix(vec![vec![5, 0], vec![5, 3]]);
        assert!(predict(&m, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_weighted_average_of_similar_users() {
        // User 0 vs 1: co-rated {0} -> 1.0; user 0 vs 2: co-rated {0, 1} -> (20+6)/(sqrt(29)*sqrt(25))
        let m = matrix(vec![
            vec![5, 2, 0, 0],
            vec![4, 0, 3, 0],
            vec![4, 3, 1, 0],
        ]);
        let s2 = 26.0 / (29.0_f64.sqrt() * 5.0);

        let result = predict(&m, 0, 10).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].movie_index, 2);

        let expected = (1.0 * 3.0 + s2 * 1.0) / (1.0 + s2);
        assert!((result[0].predicted_score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rated_movies_never_recommended() {
        let m = matrix(vec![vec![5, 0, 1, 0], vec![5, 4, 5, 2], vec![1, 5, 5, 5]]);
        let result = predict(&m, 0, 10).unwrap();
        let movies: Vec<usize> = result.iter().map(|r| r.movie_index).collect();
        assert_eq!(movies.len(), 2);
        assert!(!movies.contains(&0));
        assert!(!movies.contains(&2));
    }

    #[test]
    fn test_target_user_is_not_compared_with_itself() {
        // Only user 1 may contribute to movie 1
        let m = matrix(vec![vec![3, 0], vec![3, 4]]);
        let result = predict(&m, 0, 5).unwrap();
        assert_eq!(result, vec![Recommendation::new(1, 4.0)]);
    }

    #[test]
    fn test_ties_keep_movie_order() {
        let m = matrix(vec![vec![5, 0, 0, 0], vec![5, 3, 3, 3]]);
        let result = predict(&m, 0, 10).unwrap();
        let movies: Vec<usize> = result.iter().map(|r| r.movie_index).collect();
        assert_eq!(movies, vec![1, 2, 3]);
        assert!(result.iter().all(|r| r.predicted_score == 3.0));
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let m = matrix(vec![vec![5, 0, 0, 0, 0], vec![5, 1, 4, 2, 5]]);
        let result = predict(&m, 0, 3).unwrap();
        let movies: Vec<usize> = result.iter().map(|r| r.movie_index).collect();
        assert_eq!(movies, vec![4, 2, 3]);
    }

    #[test]
    fn test_single_user_matrix_has_no_recommendations() {
        let m = matrix(vec![vec![5, 0, 0]]);
        assert!(predict(&m, 0, 3).unwrap().is_empty());
    }

    #[test]
    fn test_recommend_packages_result() {
        let m = matrix(vec![vec![5, 0], vec![5, 3]]);
        let set = Predictor::new(&m).recommend(0, 5).unwrap();
        assert_eq!(set.target_user, 0);
        assert_eq!(set.top_n, 5);
        assert_eq!(set.recommendations, vec![Recommendation::new(1, 3.0)]);
    }

    #[test]
    fn test_precomputed_similarities_rejects_foreign_matrix() {
        let m = matrix(vec![vec![5, 0], vec![5, 3]]);
        let other = matrix(vec![vec![5, 0], vec![5, 3], vec![1, 1]]);
        let sims = SimilarityMatrix::compute(&other);
        assert_eq!(
            Predictor::new(&m).predict_with_similarities(&sims, 0, 5),
            Err(RecommendError::SimilarityShapeMismatch {
                expected_users: 2,
                expected_movies: 2,
                found_users: 3,
                found_movies: 2,
            })
        );
    }

    #[test]
    fn test_precomputed_similarities_rejects_different_movie_count() {
        let m = matrix(vec![vec![5, 0], vec![5, 3]]);
        let wider = matrix(vec![vec![5, 0, 1], vec![5, 3, 1]]);
        let sims = SimilarityMatrix::compute(&wider);
        assert_eq!(
            Predictor::new(&m).predict_with_similarities(&sims, 0, 5),
            Err(RecommendError::SimilarityShapeMismatch {
                expected_users: 2,
                expected_movies: 2,
                found_users: 2,
                found_movies: 3,
            })
        );
    }

    fn ratings_matrix() -> impl Strategy<Value = RatingsMatrix> {
        (1usize..8, 1usize..12).prop_flat_map(|(users, movies)| {
            proptest::collection::vec(proptest::collection::vec(0u32..6, movies), users)
                .prop_map(|rows| RatingsMatrix::new(rows).unwrap())
        })
    }

    proptest! {
        #[test]
        fn predictions_respect_ranking_invariants(m in ratings_matrix(), top_n in 0usize..12) {
            for target in 0..m.user_count() {
                let result = predict(&m, target, top_n).unwrap();
                let all = predict(&m, target, usize::MAX).unwrap();

                prop_assert_eq!(result.len(), top_n.min(all.len()));
                prop_assert_eq!(&result[..], &all[..result.len()]);

                for rec in &all {
                    prop_assert_eq!(m.rating(target, rec.movie_index), 0);
                    let supported = (0..m.user_count())
                        .any(|u| u != target && m.rating(u, rec.movie_index) != 0);
                    prop_assert!(supported);
                }

                for pair in all.windows(2) {
                    prop_assert!(pair[0].predicted_score >= pair[1].predicted_score);
                    if pair[0].predicted_score == pair[1].predicted_score {
                        prop_assert!(pair[0].movie_index < pair[1].movie_index);
                    }
                }
            }
        }

        #[test]
        fn precomputed_similarities_match_direct_prediction(m in ratings_matrix(), top_n in 0usize..12) {
            let sims = SimilarityMatrix::compute(&m);
            let predictor = Predictor::new(&m);
            for target in 0..m.user_count() {
                prop_assert_eq!(
                    predictor.predict(target, top_n).unwrap(),
                    predictor.predict_with_similarities(&sims, target, top_n).unwrap()
                );
            }
        }
    }
}

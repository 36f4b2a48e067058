use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised by the recommendation engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Ratings dataset contains no rows")]
    EmptyDataset,

    #[error("Malformed row {row}: expected {expected} ratings, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("User index {user} is out of range (dataset has {user_count} users)")]
    UserIndexOutOfRange { user: usize, user_count: usize },

    #[error(
        "Similarity matrix was computed for {found_users}x{found_movies} ratings, \
         ratings matrix is {expected_users}x{expected_movies}"
    )]
    SimilarityShapeMismatch {
        expected_users: usize,
        expected_movies: usize,
        found_users: usize,
        found_movies: usize,
    },
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Recommend(RecommendError::UserIndexOutOfRange { .. }) => {
                StatusCode::NOT_FOUND
            }
            AppError::Recommend(_) | AppError::Csv(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_maps_to_not_found() {
        let err = AppError::from(RecommendError::UserIndexOutOfRange {
            user: 7,
            user_count: 3,
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_dataset_errors_map_to_unprocessable() {
        let err = AppError::from(RecommendError::EmptyDataset);
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err = AppError::InvalidInput("top_n".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_messages() {
        let err = RecommendError::MalformedRow {
            row: 4,
            expected: 10,
            found: 9,
        };
        assert_eq!(
            err.to_string(),
            "Malformed row 4: expected 10 ratings, found 9"
        );

        let err = AppError::from(RecommendError::UserIndexOutOfRange {
            user: 3,
            user_count: 3,
        });
        assert_eq!(
            err.to_string(),
            "User index 3 is out of range (dataset has 3 users)"
        );
    }
}

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MatrixSummary, RecommendationSet},
    services::{report, Predictor},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub top_n: Option<usize>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Shape of the loaded ratings matrix
pub async fn get_matrix(State(state): State<AppState>) -> Json<MatrixSummary> {
    Json(state.matrix.summary())
}

/// Ranked recommendations for a 0-based user index
pub async fn get_recommendations(
    State(state): State<AppState>,
    request_id: RequestId,
    user: Result<Path<usize>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationSet>> {
    let (Path(user), Query(query)) = (user?, query?);
    let set = recommend(&state, &request_id, user, query)?;
    Ok(Json(set))
}

/// HTML report of the recommendations for a 0-based user index
pub async fn get_report(
    State(state): State<AppState>,
    request_id: RequestId,
    user: Result<Path<usize>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Html<String>> {
    let (Path(user), Query(query)) = (user?, query?);
    let set = recommend(&state, &request_id, user, query)?;
    Ok(Html(report::render_html(&set, state.score_precision)))
}

fn recommend(
    state: &AppState,
    request_id: &RequestId,
    user: usize,
    query: RecommendationQuery,
) -> AppResult<RecommendationSet> {
    let top_n = query.top_n.unwrap_or(state.default_top_n);

    tracing::info!(
        request_id = %request_id,
        target_user = user,
        top_n,
        "Processing recommendation request"
    );

    let set = Predictor::new(&state.matrix).recommend(user, top_n)?;

    tracing::info!(
        request_id = %request_id,
        returned = set.recommendations.len(),
        "Recommendations computed"
    );

    Ok(set)
}

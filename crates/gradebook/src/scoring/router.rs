use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::scorer::Scorer;
use super::store::{ProjectNamer, ScheduleProvider, ScoringError, SignalStore};

#[derive(Debug, Deserialize)]
pub(crate) struct StandingsQuery {
    subgroup: Option<String>,
}

/// Router exposing the scoring engine to the web layer.
pub fn scoring_router<S, D, N>(scorer: Arc<Scorer<S, D, N>>) -> Router
where
    S: SignalStore + 'static,
    D: ScheduleProvider + 'static,
    N: ProjectNamer + 'static,
{
    Router::new()
        .route(
            "/api/v1/standings/:cohort",
            get(standings_handler::<S, D, N>),
        )
        .route(
            "/api/v1/users/:login/scores",
            get(user_scores_handler::<S, D, N>),
        )
        .with_state(scorer)
}

pub(crate) async fn standings_handler<S, D, N>(
    State(scorer): State<Arc<Scorer<S, D, N>>>,
    Path(cohort): Path<String>,
    Query(query): Query<StandingsQuery>,
) -> Response
where
    S: SignalStore + 'static,
    D: ScheduleProvider + 'static,
    N: ProjectNamer + 'static,
{
    match scorer.score_cohort(&cohort, query.subgroup.as_deref()) {
        Ok(standings) => (StatusCode::OK, axum::Json(standings)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

pub(crate) async fn user_scores_handler<S, D, N>(
    State(scorer): State<Arc<Scorer<S, D, N>>>,
    Path(login): Path<String>,
) -> Response
where
    S: SignalStore + 'static,
    D: ScheduleProvider + 'static,
    N: ProjectNamer + 'static,
{
    match scorer.score_login(&login) {
        Ok(scores) => (StatusCode::OK, axum::Json(scores)).into_response(),
        Err(error) => scoring_error_response(error),
    }
}

fn scoring_error_response(error: ScoringError) -> Response {
    let status = match &error {
        ScoringError::MissingSchedule(_) | ScoringError::UnknownUser(_) => StatusCode::NOT_FOUND,
        ScoringError::UserNotLinked(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoringError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{EligibilityRequest, StudentId};
use super::repository::{RepositoryError, StudentRepository};
use super::service::{EligibilityService, ServiceError};

/// Router builder exposing the eligibility check and decision lookup.
pub fn admissions_router<R>(service: Arc<EligibilityService<R>>) -> Router
where
    R: StudentRepository + 'static,
{
    Router::new()
        .route("/api/v1/admissions/check", post(check_handler::<R>))
        .route(
            "/api/v1/admissions/decisions/:student_id",
            get(decision_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn check_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    axum::Json(request): axum::Json<EligibilityRequest>,
) -> Response
where
    R: StudentRepository + 'static,
{
    match service.check(request) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(ServiceError::Validation(report)) => {
            let payload = json!({ "errors": report.errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_failure(other),
    }
}

pub(crate) async fn decision_handler<R>(
    State(service): State<Arc<EligibilityService<R>>>,
    Path(student_id): Path<String>,
) -> Response
where
    R: StudentRepository + 'static,
{
    let id = StudentId(student_id);
    match service.latest_decision(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(ServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({ "error": "unknown student" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_failure(other),
    }
}

/// Catalog lookups past validation and repository faults are internal
/// failures: log the cause, never surface it.
fn internal_failure(cause: ServiceError) -> Response {
    error!(%cause, "eligibility request failed");
    let payload = json!({ "error": "internal error" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::compatibility::ScoringFormula;
use super::service::{MatchingService, MatchingServiceError};
use crate::error::AppError;
use crate::session::Session;
use crate::talent::{
    CandidateSkill, DepartmentId, ProfileId, RequiredSkill, TalentDirectory, VacancyId,
};

/// Header carrying the signed-in profile id.
pub const PROFILE_HEADER: &str = "x-profile-id";

/// Router builder exposing compatibility scoring, candidate ranking, and coverage.
pub fn matching_router<D>(service: Arc<MatchingService<D>>) -> Router
where
    D: TalentDirectory + 'static,
{
    Router::new()
        .route("/api/v1/compatibility", post(evaluate_handler::<D>))
        .route(
            "/api/v1/vacancies/:vacancy_id/candidates",
            get(overview_handler::<D>),
        )
        .route(
            "/api/v1/vacancies/:vacancy_id/candidates/:profile_id",
            get(candidate_handler::<D>),
        )
        .route("/api/v1/reports/coverage", get(coverage_handler::<D>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub formula: Option<ScoringFormula>,
    pub required: Vec<RequiredSkill>,
    #[serde(default)]
    pub candidate: Vec<CandidateSkill>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CoverageQuery {
    #[serde(default)]
    pub department_id: Option<u32>,
}

pub(crate) async fn evaluate_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    payload: Result<axum::Json<EvaluateRequest>, JsonRejection>,
) -> Response
where
    D: TalentDirectory + 'static,
{
    let axum::Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    let result = service.evaluate(request.formula, &request.required, &request.candidate);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn overview_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    path: Result<Path<u32>, PathRejection>,
    headers: HeaderMap,
) -> Response
where
    D: TalentDirectory + 'static,
{
    let Path(vacancy_id) = match path {
        Ok(path) => path,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    let session = match resolve_session(&service, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match service.vacancy_overview(&session, VacancyId(vacancy_id)) {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn candidate_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    path: Result<Path<(u32, String)>, PathRejection>,
    headers: HeaderMap,
) -> Response
where
    D: TalentDirectory + 'static,
{
    let Path((vacancy_id, profile_id)) = match path {
        Ok(path) => path,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    let session = match resolve_session(&service, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match service.candidate_gap(&session, VacancyId(vacancy_id), &ProfileId(profile_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn coverage_handler<D>(
    State(service): State<Arc<MatchingService<D>>>,
    query: Result<Query<CoverageQuery>, QueryRejection>,
    headers: HeaderMap,
) -> Response
where
    D: TalentDirectory + 'static,
{
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    let session = match resolve_session(&service, &headers) {
        Ok(session) => session,
        Err(response) => return response,
    };

    match service.coverage(&session, query.department_id.map(DepartmentId)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

fn resolve_session<D>(
    service: &MatchingService<D>,
    headers: &HeaderMap,
) -> Result<Session, Response>
where
    D: TalentDirectory + 'static,
{
    let profile_id = headers
        .get(PROFILE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            let payload = json!({ "error": format!("missing {PROFILE_HEADER} header") });
            (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
        })?;

    match service.session_for(&ProfileId(profile_id.to_string())) {
        Ok(session) => Ok(session),
        Err(MatchingServiceError::ProfileNotFound(id)) => {
            let payload = json!({ "error": format!("unknown profile {id}") });
            Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response())
        }
        Err(other) => Err(error_response(other)),
    }
}

fn error_response(error: MatchingServiceError) -> Response {
    AppError::from(error).into_response()
}

/// Extractor failures keep axum's status but answer with the JSON error shape.
fn rejection_response(status: StatusCode, detail: String) -> Response {
    let payload = json!({ "error": detail });
    (status, axum::Json(payload)).into_response()
}

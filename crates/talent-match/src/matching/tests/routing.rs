use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::matching::PROFILE_HEADER;

fn get(uri: &str, profile: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(profile) = profile {
        builder = builder.header(PROFILE_HEADER, profile);
    }
    builder.body(Body::empty()).expect("request builds")
}

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn compatibility_endpoint_scores_without_identity() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(post_json(
            "/api/v1/compatibility",
            json!({
                "formula": "partial_credit",
                "required": [
                    { "skill_id": 1, "target_grade": 3 },
                    { "skill_id": 2, "target_grade": 2 }
                ],
                "candidate": [
                    { "skill_id": 1, "actual_grade": 3 },
                    { "skill_id": 2, "actual_grade": 1 }
                ]
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["compatibility"], 75);
    assert_eq!(body["band"], "strong");
    assert_eq!(body["formula"], "partial_credit");
    assert_eq!(body["breakdown"][1]["skill_name"], "SQL");
    assert_eq!(body["breakdown"][1]["gap"], 1);
}

#[tokio::test]
async fn compatibility_endpoint_rejects_out_of_scale_grades() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(post_json(
            "/api/v1/compatibility",
            json!({
                "required": [{ "skill_id": 1, "target_grade": 5 }],
                "candidate": []
            }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("0-3 scale"));
}

#[tokio::test]
async fn overview_lists_ranked_candidates_for_leaders() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/vacancies/10/candidates", Some("p-lead")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["vacancy"]["title"], "Frontend Engineer");
    assert_eq!(body["formula"], "binary_gap");
    assert_eq!(body["candidates"][0]["profile_id"], "p-ben");
    assert_eq!(body["candidates"][1]["compatibility"], 83);
}

#[tokio::test]
async fn missing_identity_header_is_unauthorized() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/vacancies/10/candidates", None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains(PROFILE_HEADER));
}

#[tokio::test]
async fn unknown_profile_is_unauthorized() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/vacancies/10/candidates", Some("p-ghost")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn collaborator_is_forbidden() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/vacancies/10/candidates/p-ben", Some("p-ana")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_vacancy_is_not_found() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/vacancies/404/candidates", Some("p-admin")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn candidate_detail_returns_breakdown() {
    let router = router_with_directory(MemoryDirectory::default());

    let uri = format!("/api/v1/vacancies/{}/candidates/p-cleo", ANALYST.0);
    let response = router
        .oneshot(get(&uri, Some("p-admin")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["department"], "Data");
    assert_eq!(body["compatibility"], 0);
    assert_eq!(body["band"], "weak");
    assert_eq!(body["breakdown"][0]["gap"], 3);
}

#[tokio::test]
async fn coverage_filters_by_department() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/reports/coverage?department_id=2", Some("p-lead")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["department_id"], 2);
    assert_eq!(body["total_vacancies"], 1);
    assert_eq!(body["closed_vacancies"], 1);
}

#[tokio::test]
async fn directory_outage_is_service_unavailable() {
    let router = router_with_directory(UnavailableDirectory);

    let response = router
        .oneshot(get("/api/v1/vacancies/10/candidates", Some("p-lead")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn malformed_vacancy_id_answers_with_json_error() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/vacancies/abc/candidates", Some("p-lead")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("abc"));
}

#[tokio::test]
async fn malformed_compatibility_body_answers_with_json_error() {
    let router = router_with_directory(MemoryDirectory::default());

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/compatibility")
        .header("content-type", "application/json")
        .body(Body::from("{\"required\": ["))
        .expect("request builds");
    let response = router.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_department_filter_answers_with_json_error() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get(
            "/api/v1/reports/coverage?department_id=data",
            Some("p-lead"),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn service_errors_share_the_application_error_body() {
    let router = router_with_directory(MemoryDirectory::default());

    let response = router
        .oneshot(get("/api/v1/reports/coverage", Some("p-cleo")))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        "matching error: role collaborator may not review candidates"
    );
}

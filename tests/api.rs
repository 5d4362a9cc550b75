//! Router-level tests: auth rejection, unknown routes, wrong verbs, input
//! validation, and the conflict/deadline paths driven through a mocked
//! store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;

use cinda_api::entities::{course, course_enrollment, opportunity, user};
use cinda_api::services::credentials;

fn test_app() -> Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    cinda_api::routes::create_routes(db)
}

fn sample_user(id: i32) -> user::Model {
    let now = chrono::Utc::now().naive_utc();
    user::Model {
        id,
        name: "Ana Filmmaker".to_string(),
        email: "ana@example.com".to_string(),
        password: Some("$argon2id$placeholder".to_string()),
        user_type: user::Role::Filmmaker,
        avatar: None,
        bio: None,
        location: None,
        website: None,
        specialization: None,
        social_provider: None,
        social_provider_id: None,
        followers: 0,
        following: 0,
        projects: 0,
        awards: 0,
        is_verified: false,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}

fn sample_course(id: i32) -> course::Model {
    let now = chrono::Utc::now().naive_utc();
    course::Model {
        id,
        title: "Lighting Fundamentals".to_string(),
        category: course::Category::Lighting,
        instructor: None,
        description: "Three-point setups".to_string(),
        image: None,
        duration: None,
        level: course::Level::Beginner,
        price: 0.0,
        lessons: None,
        is_published: true,
        enrolled_count: 1,
        created_at: now,
        updated_at: now,
    }
}

fn bearer_for(user: &user::Model) -> String {
    let token = credentials::issue_token(user.id, user.user_type, &user.email).unwrap();
    format!("Bearer {token}")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn protected_route_without_token_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/users/profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Token is missing");
}

#[tokio::test]
async fn protected_route_with_garbage_token_is_rejected() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/mentorships")
                .header("Authorization", "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token is invalid or expired");
}

#[tokio::test]
async fn unknown_route_returns_envelope_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/no-such-thing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Endpoint not found");
}

#[tokio::test]
async fn wrong_method_returns_envelope_405() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test]
async fn search_without_query_is_a_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/search?q=%20%20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Search query is required");
}

#[tokio::test]
async fn registering_a_taken_email_is_a_conflict() {
    // The advisory email lookup finds an existing row.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![sample_user(1)]])
        .into_connection();
    let app = cinda_api::routes::create_routes(db);

    let payload = json!({
        "name": "Ana Filmmaker",
        "email": "ana@example.com",
        "password": "s3cret-pass",
        "userType": "filmmaker"
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User already exists with this email");
}

#[tokio::test]
async fn enrolling_twice_is_a_conflict() {
    let user = sample_user(1);
    let enrollment = course_enrollment::Model {
        id: 5,
        user_id: 1,
        course_id: 7,
        progress: 40,
        enrolled_at: chrono::Utc::now().naive_utc(),
    };
    // Middleware user load, then the course row, then the existing enrollment.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .append_query_results([vec![sample_course(7)]])
        .append_query_results([vec![enrollment]])
        .into_connection();
    let app = cinda_api::routes::create_routes(db);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/courses/7/enroll")
                .header("Authorization", bearer_for(&user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Already enrolled in this course");
}

#[tokio::test]
async fn enrolling_in_a_missing_course_is_not_found() {
    let user = sample_user(1);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .append_query_results([Vec::<course::Model>::new()])
        .into_connection();
    let app = cinda_api::routes::create_routes(db);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/courses/999/enroll")
                .header("Authorization", bearer_for(&user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Course not found");
}

#[tokio::test]
async fn applying_after_the_deadline_is_rejected() {
    let user = sample_user(1);
    let now = chrono::Utc::now().naive_utc();
    let opportunity = opportunity::Model {
        id: 3,
        kind: opportunity::Kind::Grant,
        title: "Short Film Grant".to_string(),
        company: "Cinda Fund".to_string(),
        description: "Production grant".to_string(),
        details: None,
        funding: None,
        location: None,
        category: None,
        deadline: now - chrono::Duration::days(1),
        is_active: true,
        applications_count: 0,
        created_at: now,
        updated_at: now,
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user.clone()]])
        .append_query_results([vec![opportunity]])
        .into_connection();
    let app = cinda_api::routes::create_routes(db);

    let payload = json!({ "coverLetter": "I would love to make this film." });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/opportunities/3/apply")
                .header("Authorization", bearer_for(&user))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Application deadline has passed");
}

#[tokio::test]
async fn health_reports_mock_backend_as_healthy() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Server is healthy");
}

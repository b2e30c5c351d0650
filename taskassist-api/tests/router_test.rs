/// Router-level tests for the TaskAssist API
///
/// These tests exercise the assembled router without a live database: the
/// pool is created lazily and the covered paths (auth rejection, request
/// validation, routing) fail or succeed before any query runs. Paths that
/// need real data live behind a PostgreSQL instance and are covered by the
/// model layer.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use taskassist_api::{
    app::{build_router, AppState},
    config::{ApiConfig, Config, DatabaseConfig, JwtConfig},
};
use taskassist_shared::auth::jwt;
use tower::ServiceExt;
use uuid::Uuid;

const TEST_SECRET: &str = "router-test-secret-key-at-least-32-bytes";

fn test_app() -> axum::Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            // Never connected; the lazy pool only dials on first query
            url: "postgresql://localhost:1/unreachable".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    build_router(AppState::new(pool, config))
}

fn bearer_token() -> String {
    let claims = jwt::Claims::new(Uuid::new_v4());
    format!("Bearer {}", jwt::create_token(&claims, TEST_SECRET).unwrap())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Health never fails; an unreachable database reports as degraded
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "disconnected");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app();

    for uri in [
        "/api/auth/me",
        "/api/users/search?q=sarah",
        "/api/projects",
        "/api/tasks",
        "/api/tasks/summary",
    ] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNAUTHORIZED,
            "expected 401 for {}",
            uri
        );

        let json = body_json(response).await;
        assert_eq!(json["message"], "Missing authorization header");
    }
}

#[tokio::test]
async fn test_malformed_authorization_header_rejected() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Expected Bearer token");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .header("authorization", "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_rejected() {
    let app = test_app();

    let claims = jwt::Claims::new(Uuid::new_v4());
    let token = jwt::create_token(&claims, "a-completely-different-32-byte-secret!").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/tasks")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation_envelope() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "username": "ab",
                        "password": "short",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(
        json["errors"]["username"],
        "Username must be at least 3 characters"
    );
    assert_eq!(
        json["errors"]["password"],
        "Password must be at least 6 characters"
    );
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "username": "sarah",
                        "password": "hunter22",
                        "email": "not-an-email",
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["errors"]["email"], "Invalid email format");
}

#[tokio::test]
async fn test_create_task_rejects_empty_title() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tasks")
                .header("authorization", bearer_token())
                .header("content-type", "application/json")
                .body(Body::from(json!({ "title": "" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Validation failed");
    assert_eq!(json["errors"]["title"], "Title must not be empty");
}

#[tokio::test]
async fn test_add_self_as_team_member_rejected() {
    let app = test_app();
    let user_id = Uuid::new_v4();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/team-members")
                .header("authorization", bearer_token())
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({
                        "user_id_1": user_id,
                        "user_id_2": user_id,
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Cannot add yourself as a team member");
}

#[tokio::test]
async fn test_team_member_routes_split_user_and_relationship_ids() {
    let app = test_app();

    // Teammate listing lives under /user/:user_id. A matched route with a
    // malformed UUID is rejected by the path extractor (400), while an
    // unmatched path is 404; that distinction pins the route shapes.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/team-members/user/not-a-uuid")
                .header("authorization", bearer_token())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Deletion takes a relationship row ID at the top level
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/team-members/not-a-uuid")
                .header("authorization", bearer_token())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Paths outside those two shapes fall through to 404
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/team-members/user/not-a-uuid/extra")
                .header("authorization", bearer_token())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    // Not production: no HSTS
    assert!(headers.get("Strict-Transport-Security").is_none());
}

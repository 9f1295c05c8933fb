// Authentication-gate behavior that needs no database: every rejection here
// happens before any handler or repository code runs.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use taskpad_api::auth::{encode_claims, Claims};
use taskpad_api::server::app;

const SECRET: &str = "gate-test-secret";

fn set_secret() {
    std::env::set_var("JWT_SECRET_KEY", SECRET);
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn missing_header_is_rejected() {
    let response = app()
        .oneshot(Request::builder().uri("/todos").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing Authorization header");
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/users/profile")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Authorization header must use Bearer token format"
    );
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    set_secret();
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/todos")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    set_secret();
    let iat = Utc::now().timestamp() - 7200;
    let claims = Claims {
        user_id: Uuid::new_v4(),
        email: "a@example.com".to_string(),
        exp: iat + 60,
        iat,
    };
    let token = encode_claims(&claims, SECRET).expect("encode");

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/todos")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Token expired");
}

#[tokio::test]
async fn delete_without_token_never_reaches_the_handler() {
    // DELETE on a protected route with no credentials must short-circuit;
    // a 401 with the gate's message shows the handler was never entered.
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/todos/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing Authorization header");
}

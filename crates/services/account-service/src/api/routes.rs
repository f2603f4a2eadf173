//! Application route configuration.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{auth_routes, health};
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::service::{LoginOutput, MockAuthService, SignupOutput};
    use common::AppError;
    use domain::UserStatus;

    fn app(auth: MockAuthService) -> Router {
        create_router(AppState::new(Arc::new(auth)))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_signup_returns_created() {
        let id = Uuid::new_v4();
        let mut auth = MockAuthService::new();
        auth.expect_signup()
            .withf(|input| input.email == "test@example.com" && input.name == "Test")
            .returning(move |input| {
                Ok(SignupOutput {
                    id,
                    name: input.name,
                    email: input.email,
                    status: UserStatus::Active,
                    created_at: Utc.with_ymd_and_hms(2026, 1, 18, 0, 0, 0).unwrap(),
                })
            });

        let response = app(auth)
            .oneshot(post_json(
                "/signup",
                serde_json::json!({"email": "test@example.com", "password": "password", "name": "Test"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json(response).await;
        assert_eq!(body["id"], id.to_string());
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(body["createdAt"], "2026-01-18T00:00:00Z");
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let mut auth = MockAuthService::new();
        auth.expect_signup().never();

        let response = app(auth)
            .oneshot(post_json(
                "/signup",
                serde_json::json!({"email": "nope", "password": "password", "name": "Test"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_signup_rejects_missing_field() {
        let mut auth = MockAuthService::new();
        auth.expect_signup().never();

        let response = app(auth)
            .oneshot(post_json(
                "/signup",
                serde_json::json!({"email": "test@example.com", "password": "password"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let user_id = Uuid::new_v4();
        let mut auth = MockAuthService::new();
        auth.expect_login().returning(move |input| {
            Ok(LoginOutput {
                token: "signed.jwt.token".to_string(),
                expires_at: Utc.with_ymd_and_hms(2026, 1, 18, 1, 0, 0).unwrap(),
                user_id,
                user_name: "Test".to_string(),
                user_email: input.email,
            })
        });

        let response = app(auth)
            .oneshot(post_json(
                "/v1/users/login",
                serde_json::json!({"email": "test@example.com", "password": "password"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["token"], "signed.jwt.token");
        assert_eq!(body["expiresAt"], "2026-01-18T01:00:00Z");
        assert_eq!(body["user"]["id"], user_id.to_string());
        assert_eq!(body["user"]["email"], "test@example.com");
    }

    #[tokio::test]
    async fn test_login_invalid_credential_is_unauthorized() {
        let mut auth = MockAuthService::new();
        auth.expect_login()
            .returning(|_| Err(AppError::InvalidCredential));

        let response = app(auth)
            .oneshot(post_json(
                "/v1/users/login",
                serde_json::json!({"email": "test@example.com", "password": "password"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
        assert_eq!(body["error"]["message"], "invalid credential");
    }

    #[tokio::test]
    async fn test_health_in_memory() {
        let response = app(MockAuthService::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["status"], "healthy");
    }
}

//! HTTP route handlers for the JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Products
//! GET  /api/products           - Catalog listing (category/min_price/max_price filters)
//! GET  /api/products/related   - Up to 4 products sharing a category
//! GET  /api/products/{id}      - Product detail by external id
//!
//! # Cart (identity from the x-user-id header)
//! GET    /api/cart             - Current item list
//! POST   /api/cart             - Add an item (merges quantities)
//! PUT    /api/cart             - Overwrite an item's quantity
//! DELETE /api/cart             - Remove one item, or clear the cart
//!
//! # Auth
//! POST /api/auth/register      - Create an account
//! POST /api/auth/login         - Exchange credentials for a session token
//! ```

pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/related", get(products::related))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(cart::show)
            .post(cart::add)
            .put(cart::update)
            .delete(cart::remove),
    )
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/auth", auth_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    //! Validation-path tests.
    //!
    //! These drive the router with a lazy pool that never connects, so only
    //! branches that reject a request before touching the store are covered.
    //! Store-backed behavior is exercised by the integration-tests crate.

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::routes;
    use crate::config::ApiConfig;
    use crate::state::AppState;

    fn test_app() -> Router {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/unreachable"),
            host: "127.0.0.1".parse().unwrap(),
            port: 5328,
            cors_origin: "http://localhost:3000".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unreachable")
            .unwrap();

        routes().with_state(AppState::new(config, pool))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_related_without_category_is_400() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/products/related")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Category parameter is required");
    }

    #[tokio::test]
    async fn test_cart_add_without_fields_is_400() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/cart", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid item data");
    }

    #[tokio::test]
    async fn test_cart_add_with_zero_quantity_is_400() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/cart",
                r#"{"product_id": "prod-1", "quantity": 0}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid item data");
    }

    #[tokio::test]
    async fn test_cart_update_without_quantity_is_400() {
        let response = test_app()
            .oneshot(json_request(
                "PUT",
                "/api/cart",
                r#"{"product_id": "prod-1"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid item data");
    }

    #[tokio::test]
    async fn test_register_without_fields_is_400() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/auth/register", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid user data");
    }

    #[tokio::test]
    async fn test_register_with_empty_password_is_400() {
        let response = test_app()
            .oneshot(json_request(
                "POST",
                "/api/auth/register",
                r#"{"email": "a@b.c", "password": ""}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid user data");
    }

    #[tokio::test]
    async fn test_login_without_fields_is_400() {
        let response = test_app()
            .oneshot(json_request("POST", "/api/auth/login", "{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid credentials");
    }
}

//! Integration tests for cart endpoints.
//!
//! Each test uses a random `x-user-id` so runs don't interfere with each
//! other or with previous runs.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - A seeded catalog (clem-cli seed products)
//! - The API server running (cargo run -p clementine-api)
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5328".to_string())
}

/// Test helper: a user id no other run has touched.
fn fresh_user_id() -> String {
    let nonce: u64 = rand::rng().random();
    format!("it-user-{nonce:016x}")
}

/// Test helper: id of some product that exists in the catalog.
async fn any_product_id(client: &Client) -> Option<String> {
    let base_url = api_base_url();
    let products: Vec<Value> = client
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .expect("Failed to fetch products")
        .json()
        .await
        .expect("Invalid products body");

    products
        .first()
        .map(|p| p["id"].as_str().expect("id is a string").to_owned())
}

/// Test helper: current item list for a user.
async fn get_items(client: &Client, user_id: &str) -> Vec<Value> {
    let base_url = api_base_url();
    client
        .get(format!("{base_url}/api/cart"))
        .header("x-user-id", user_id)
        .send()
        .await
        .expect("Failed to fetch cart")
        .json()
        .await
        .expect("Invalid cart body")
}

/// Test helper: POST an item to a user's cart.
async fn post_item(client: &Client, user_id: &str, product_id: &str, quantity: u32) -> Vec<Value> {
    let base_url = api_base_url();
    let resp = client
        .post(format!("{base_url}/api/cart"))
        .header("x-user-id", user_id)
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to add to cart");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid cart body")
}

// ============================================================================
// Read Semantics
// ============================================================================

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn missing_cart_reads_as_empty_list() {
    let client = Client::new();
    let items = get_items(&client, &fresh_user_id()).await;
    assert!(items.is_empty());
}

// ============================================================================
// Add Semantics
// ============================================================================

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn adding_same_product_twice_merges_quantities() {
    let client = Client::new();
    let user_id = fresh_user_id();
    let Some(product_id) = any_product_id(&client).await else {
        return; // empty catalog
    };

    let items = post_item(&client, &user_id, &product_id, 2).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);

    // Additive merge, not overwrite
    let items = post_item(&client, &user_id, &product_id, 3).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);
    assert_eq!(items[0]["productId"].as_str(), Some(product_id.as_str()));
}

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn adding_unknown_product_is_404() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/cart"))
        .header("x-user-id", fresh_user_id())
        .json(&json!({ "product_id": "definitely-not-a-product", "quantity": 1 }))
        .send()
        .await
        .expect("Failed to call add");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["error"].as_str(), Some("Product not found"));
}

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn adding_without_quantity_is_400() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .post(format!("{base_url}/api/cart"))
        .header("x-user-id", fresh_user_id())
        .json(&json!({ "product_id": "prod-1" }))
        .send()
        .await
        .expect("Failed to call add");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["error"].as_str(), Some("Invalid item data"));
}

// ============================================================================
// Update Semantics
// ============================================================================

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn update_overwrites_quantity() {
    let client = Client::new();
    let base_url = api_base_url();
    let user_id = fresh_user_id();
    let Some(product_id) = any_product_id(&client).await else {
        return;
    };

    post_item(&client, &user_id, &product_id, 2).await;

    let resp = client
        .put(format!("{base_url}/api/cart"))
        .header("x-user-id", &user_id)
        .json(&json!({ "product_id": product_id, "quantity": 7 }))
        .send()
        .await
        .expect("Failed to call update");
    assert_eq!(resp.status(), StatusCode::OK);

    let items: Vec<Value> = resp.json().await.expect("Invalid body");
    assert_eq!(items.len(), 1);
    // Overwritten to exactly 7, not 2 + 7
    assert_eq!(items[0]["quantity"], 7);
}

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn updating_without_a_cart_is_404() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .put(format!("{base_url}/api/cart"))
        .header("x-user-id", fresh_user_id())
        .json(&json!({ "product_id": "prod-1", "quantity": 1 }))
        .send()
        .await
        .expect("Failed to call update");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["error"].as_str(), Some("Cart not found"));
}

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn updating_a_product_not_in_cart_is_404_and_leaves_cart_unchanged() {
    let client = Client::new();
    let base_url = api_base_url();
    let user_id = fresh_user_id();
    let Some(product_id) = any_product_id(&client).await else {
        return;
    };

    let before = post_item(&client, &user_id, &product_id, 2).await;

    let resp = client
        .put(format!("{base_url}/api/cart"))
        .header("x-user-id", &user_id)
        .json(&json!({ "product_id": "definitely-not-in-cart", "quantity": 9 }))
        .send()
        .await
        .expect("Failed to call update");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["error"].as_str(), Some("Item not in cart"));

    assert_eq!(get_items(&client, &user_id).await, before);
}

// ============================================================================
// Remove Semantics
// ============================================================================

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn removing_a_missing_product_is_a_noop() {
    let client = Client::new();
    let base_url = api_base_url();
    let user_id = fresh_user_id();
    let Some(product_id) = any_product_id(&client).await else {
        return;
    };

    let before = post_item(&client, &user_id, &product_id, 2).await;

    let resp = client
        .delete(format!(
            "{base_url}/api/cart?product_id=definitely-not-in-cart"
        ))
        .header("x-user-id", &user_id)
        .send()
        .await
        .expect("Failed to call remove");
    assert_eq!(resp.status(), StatusCode::OK);

    let items: Vec<Value> = resp.json().await.expect("Invalid body");
    assert_eq!(items, before);
}

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn removing_without_product_id_clears_the_cart() {
    let client = Client::new();
    let base_url = api_base_url();
    let user_id = fresh_user_id();
    let Some(product_id) = any_product_id(&client).await else {
        return;
    };

    post_item(&client, &user_id, &product_id, 2).await;

    let resp = client
        .delete(format!("{base_url}/api/cart"))
        .header("x-user-id", &user_id)
        .send()
        .await
        .expect("Failed to call remove");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["message"].as_str(), Some("Cart cleared"));

    // A subsequent read sees an empty list again
    assert!(get_items(&client, &user_id).await.is_empty());
}

#[tokio::test]
#[ignore = "requires a running API server and database"]
async fn removing_from_a_missing_cart_is_404() {
    let client = Client::new();
    let base_url = api_base_url();

    let resp = client
        .delete(format!("{base_url}/api/cart"))
        .header("x-user-id", fresh_user_id())
        .send()
        .await
        .expect("Failed to call remove");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = resp.json().await.expect("Invalid body");
    assert_eq!(body["error"].as_str(), Some("Cart not found"));
}

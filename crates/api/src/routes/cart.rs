//! Cart route handlers.
//!
//! All cart routes derive the caller from the `x-user-id` header via
//! [`CallerIdentity`]. Responses carry the full updated item list so the
//! frontend can re-render without a follow-up fetch.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use clementine_core::ProductId;

use crate::error::Result;
use crate::middleware::CallerIdentity;
use crate::models::CartItem;
use crate::services::cart::{CartService, RemoveOutcome};
use crate::state::AppState;

/// Add/update request body.
///
/// Fields are optional so the service can reject missing data with the
/// API's own error shape instead of a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub product_id: Option<String>,
    pub quantity: Option<u32>,
}

/// Remove query parameters.
#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    pub product_id: Option<String>,
}

/// Confirmation body returned when the whole cart is deleted.
#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub message: &'static str,
}

/// Return the caller's item list; an absent cart reads as empty.
pub async fn show(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartService::new(state.pool()).items(&user_id).await?;
    Ok(Json(items))
}

/// Add a product to the caller's cart.
pub async fn add(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    Json(body): Json<ItemRequest>,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartService::new(state.pool())
        .add(&user_id, body.product_id.map(ProductId::new), body.quantity)
        .await?;

    Ok(Json(items))
}

/// Overwrite the quantity of an item in the caller's cart.
pub async fn update(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    Json(body): Json<ItemRequest>,
) -> Result<Json<Vec<CartItem>>> {
    let items = CartService::new(state.pool())
        .update(&user_id, body.product_id.map(ProductId::new), body.quantity)
        .await?;

    Ok(Json(items))
}

/// Remove one product from the caller's cart, or clear the cart when no
/// `product_id` query parameter is supplied.
pub async fn remove(
    State(state): State<AppState>,
    CallerIdentity(user_id): CallerIdentity,
    Query(query): Query<RemoveQuery>,
) -> Result<Response> {
    let outcome = CartService::new(state.pool())
        .remove(&user_id, query.product_id.map(ProductId::new))
        .await?;

    let response = match outcome {
        RemoveOutcome::Items(items) => Json(items).into_response(),
        RemoveOutcome::Cleared => Json(ClearedResponse {
            message: "Cart cleared",
        })
        .into_response(),
    };

    Ok(response)
}

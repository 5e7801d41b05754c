//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use clementine_core::ProductId;

use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Hard cap on related-products results.
const RELATED_LIMIT: i64 = 4;

/// Catalog listing query parameters. All filters are optional and
/// conjunctive; empty values count as absent.
///
/// The price bounds arrive as strings so that `?min_price=` (present but
/// empty) is ignored instead of failing query deserialization.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

/// Related-products query parameters.
#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub category: Option<String>,
    pub exclude_id: Option<String>,
}

/// List catalog products, optionally filtered by category and price range.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = build_filter(query);

    let products = ProductRepository::new(state.pool()).list(&filter).await?;
    Ok(Json(products))
}

/// Normalize listing query parameters into a store filter.
fn build_filter(query: ListQuery) -> ProductFilter {
    ProductFilter {
        category: query.category.filter(|c| !c.is_empty()),
        min_price: parse_price(query.min_price.as_deref()),
        max_price: parse_price(query.max_price.as_deref()),
    }
}

/// Parse an optional price bound; empty or non-numeric values count as
/// absent and filter nothing.
fn parse_price(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.parse::<f64>().ok())
}

/// Fetch a single product by its external id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .find_by_id(&ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// List up to four products sharing a category, excluding one id.
pub async fn related(
    State(state): State<AppState>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<Vec<Product>>> {
    let category = query
        .category
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Category parameter is required".to_owned()))?;
    let exclude_id = query.exclude_id.map(ProductId::new);

    let products = ProductRepository::new(state.pool())
        .related(&category, exclude_id.as_ref(), RELATED_LIMIT)
        .await?;

    Ok(Json(products))
}

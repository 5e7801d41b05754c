//! Product catalog domain type.

use serde::{Deserialize, Serialize};

use clementine_core::ProductId;

/// A catalog product.
///
/// Products are immutable after creation: there is no update endpoint, and
/// the seeding tools only ever insert. `originalPrice` and `discount` are
/// omitted from responses when unset, matching the stored-document shape.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// External identifier (e.g. `prod-17`), unique across the catalog.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub rating: f64,
    pub reviews: i32,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

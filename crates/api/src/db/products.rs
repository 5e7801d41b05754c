//! Product repository for database operations.
//!
//! The catalog is read-mostly: the API only ever filters and fetches, and
//! the CLI seeder bulk-inserts. Products are addressed by their external
//! `id` column, never by a store-internal key.

use sqlx::{PgPool, Postgres, QueryBuilder};

use clementine_core::ProductId;

use super::RepositoryError;
use crate::models::Product;

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, category, rating, reviews, \
                              is_new, original_price, discount FROM products";

/// Conjunctive catalog filter. Absent fields filter nothing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive price lower bound.
    pub min_price: Option<f64>,
    /// Inclusive price upper bound.
    pub max_price: Option<f64>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, in store default order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(SELECT_COLUMNS);
        query.push(" WHERE TRUE");

        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(min_price) = filter.min_price {
            query.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            query.push(" AND price <= ").push_bind(max_price);
        }

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Get a product by its external id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// List up to `limit` products in a category, excluding one id.
    ///
    /// With no `exclude_id` nothing is excluded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn related(
        &self,
        category: &str,
        exclude_id: Option<&ProductId>,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let sql =
            format!("{SELECT_COLUMNS} WHERE category = $1 AND ($2::text IS NULL OR id <> $2) LIMIT $3");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category)
            .bind(exclude_id.map(ProductId::as_str))
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(products)
    }

    /// Bulk-insert products, skipping ids that already exist.
    ///
    /// Returns the number of rows actually inserted. Used by the CLI seeder.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_many(&self, products: &[Product]) -> Result<u64, RepositoryError> {
        if products.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "INSERT INTO products (id, name, description, price, category, rating, reviews, \
             is_new, original_price, discount) ",
        );
        query.push_values(products, |mut row, product| {
            row.push_bind(product.id.as_str())
                .push_bind(&product.name)
                .push_bind(&product.description)
                .push_bind(product.price)
                .push_bind(&product.category)
                .push_bind(product.rating)
                .push_bind(product.reviews)
                .push_bind(product.is_new)
                .push_bind(product.original_price)
                .push_bind(product.discount);
        });
        query.push(" ON CONFLICT (id) DO NOTHING");

        let result = query.build().execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}

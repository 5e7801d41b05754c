//! Cart repository for database operations.
//!
//! A cart is one row per user; the item list lives in a JSONB column so
//! the stored shape matches the wire shape. Mutations are driven by the
//! cart service inside a transaction that first locks the row
//! (`SELECT .. FOR UPDATE`), so concurrent mutations for the same user
//! serialize instead of losing updates.

use sqlx::{PgPool, Postgres, Transaction};

use clementine_core::UserId;

use super::RepositoryError;
use crate::models::CartItem;

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a user's item list without locking.
    ///
    /// Returns `None` if the user has no cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored items are invalid.
    pub async fn items(&self, user_id: &UserId) -> Result<Option<Vec<CartItem>>, RepositoryError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT items FROM carts WHERE user_id = $1")
                .bind(user_id.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map(|(items,)| decode_items(items)).transpose()
    }

    /// Create an empty cart row for the user if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_if_missing(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &UserId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO carts (user_id, items) VALUES ($1, '[]'::jsonb) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id.as_str())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Load a user's item list and hold a row lock for the duration of `tx`.
    ///
    /// Returns `None` if the user has no cart (nothing is locked then).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored items are invalid.
    pub async fn items_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &UserId,
    ) -> Result<Option<Vec<CartItem>>, RepositoryError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT items FROM carts WHERE user_id = $1 FOR UPDATE")
                .bind(user_id.as_str())
                .fetch_optional(&mut **tx)
                .await?;

        row.map(|(items,)| decode_items(items)).transpose()
    }

    /// Persist the item list for a user whose row is locked in `tx`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the cart row doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn save(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: &UserId,
        items: &[CartItem],
    ) -> Result<(), RepositoryError> {
        let items = serde_json::to_value(items).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize cart items: {e}"))
        })?;

        let result = sqlx::query("UPDATE carts SET items = $2 WHERE user_id = $1")
            .bind(user_id.as_str())
            .bind(items)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a user's cart row.
    ///
    /// # Returns
    ///
    /// Returns `true` if a cart existed, `false` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Decode a stored JSONB item list.
fn decode_items(items: serde_json::Value) -> Result<Vec<CartItem>, RepositoryError> {
    serde_json::from_value(items).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid cart items in database: {e}"))
    })
}

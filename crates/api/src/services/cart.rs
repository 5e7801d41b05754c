//! Cart operations.
//!
//! Orchestrates the item-list semantics from [`crate::models::cart`]
//! against the store. Mutations run inside a transaction that row-locks
//! the user's cart, so concurrent requests for one user serialize; reads
//! stay lock-free.

use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{ProductId, UserId};

use crate::db::{CartRepository, ProductRepository, RepositoryError};
use crate::models::CartItem;
use crate::models::cart;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// `product_id` or `quantity` missing, empty, or zero.
    #[error("invalid item data")]
    InvalidItem,

    /// The referenced product does not exist in the catalog.
    #[error("product not found")]
    ProductNotFound,

    /// The user has no cart.
    #[error("cart not found")]
    CartNotFound,

    /// The cart does not contain the product being updated.
    #[error("item not in cart")]
    ItemNotInCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Outcome of a remove call: either the remaining items or confirmation
/// that the whole cart was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// One product was filtered out; these are the remaining items.
    Items(Vec<CartItem>),
    /// No product was named, so the cart itself was deleted.
    Cleared,
}

/// Cart service.
pub struct CartService<'a> {
    pool: &'a PgPool,
    carts: CartRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            carts: CartRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Get the user's item list. An absent cart reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    pub async fn items(&self, user_id: &UserId) -> Result<Vec<CartItem>, CartError> {
        Ok(self.carts.items(user_id).await?.unwrap_or_default())
    }

    /// Add a product to the cart, creating the cart on first use.
    ///
    /// If the product is already in the cart its quantity is incremented
    /// by `quantity`, not overwritten.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidItem` if a field is missing or zero.
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    pub async fn add(
        &self,
        user_id: &UserId,
        product_id: Option<ProductId>,
        quantity: Option<u32>,
    ) -> Result<Vec<CartItem>, CartError> {
        let (product_id, quantity) = validate_item(product_id, quantity)?;

        if self.products.find_by_id(&product_id).await?.is_none() {
            return Err(CartError::ProductNotFound);
        }

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;
        self.carts.create_if_missing(&mut tx, user_id).await?;
        let mut items = self
            .carts
            .items_for_update(&mut tx, user_id)
            .await?
            .unwrap_or_default();

        cart::add_item(&mut items, product_id, quantity);

        self.carts.save(&mut tx, user_id, &items).await?;
        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(items)
    }

    /// Overwrite the quantity of an item already in the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidItem` if a field is missing or zero.
    /// Returns `CartError::CartNotFound` if the user has no cart.
    /// Returns `CartError::ItemNotInCart` if the product isn't in the cart.
    pub async fn update(
        &self,
        user_id: &UserId,
        product_id: Option<ProductId>,
        quantity: Option<u32>,
    ) -> Result<Vec<CartItem>, CartError> {
        let (product_id, quantity) = validate_item(product_id, quantity)?;

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;
        let mut items = self
            .carts
            .items_for_update(&mut tx, user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        if !cart::set_quantity(&mut items, &product_id, quantity) {
            return Err(CartError::ItemNotInCart);
        }

        self.carts.save(&mut tx, user_id, &items).await?;
        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(items)
    }

    /// Remove one product from the cart, or delete the cart entirely when
    /// no product is named. Removing a product that isn't in the cart is a
    /// no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the user has no cart.
    pub async fn remove(
        &self,
        user_id: &UserId,
        product_id: Option<ProductId>,
    ) -> Result<RemoveOutcome, CartError> {
        // An empty product_id counts as absent, like the other falsy fields.
        let Some(product_id) = product_id.filter(|id| !id.as_str().is_empty()) else {
            if !self.carts.delete(user_id).await? {
                return Err(CartError::CartNotFound);
            }
            return Ok(RemoveOutcome::Cleared);
        };

        let mut tx = self.pool.begin().await.map_err(RepositoryError::from)?;
        let mut items = self
            .carts
            .items_for_update(&mut tx, user_id)
            .await?
            .ok_or(CartError::CartNotFound)?;

        cart::remove_item(&mut items, &product_id);

        self.carts.save(&mut tx, user_id, &items).await?;
        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(RemoveOutcome::Items(items))
    }
}

/// Validate the add/update request fields, treating missing, empty, and
/// zero values alike.
fn validate_item(
    product_id: Option<ProductId>,
    quantity: Option<u32>,
) -> Result<(ProductId, u32), CartError> {
    let product_id = product_id
        .filter(|id| !id.as_str().is_empty())
        .ok_or(CartError::InvalidItem)?;
    let quantity = quantity.filter(|q| *q > 0).ok_or(CartError::InvalidItem)?;
    Ok((product_id, quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_accepts_complete_fields() {
        let (product_id, quantity) =
            validate_item(Some(ProductId::new("prod-1")), Some(2)).unwrap();
        assert_eq!(product_id.as_str(), "prod-1");
        assert_eq!(quantity, 2);
    }

    #[test]
    fn test_validate_item_rejects_missing_fields() {
        assert!(matches!(
            validate_item(None, Some(2)),
            Err(CartError::InvalidItem)
        ));
        assert!(matches!(
            validate_item(Some(ProductId::new("prod-1")), None),
            Err(CartError::InvalidItem)
        ));
    }

    #[test]
    fn test_validate_item_rejects_falsy_fields() {
        // Empty id and zero quantity count as absent, not as values
        assert!(matches!(
            validate_item(Some(ProductId::new("")), Some(2)),
            Err(CartError::InvalidItem)
        ));
        assert!(matches!(
            validate_item(Some(ProductId::new("prod-1")), Some(0)),
            Err(CartError::InvalidItem)
        ));
    }
}

//! Cart item type and item-list semantics.
//!
//! A cart is an ordered list of (product, quantity) pairs with at most one
//! entry per product. The two write paths are intentionally different:
//! adding a product that is already present increments its quantity, while
//! updating overwrites it.

use serde::{Deserialize, Serialize};

use clementine_core::ProductId;

/// A single cart line: a product reference and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Add `quantity` of `product_id` to the item list.
///
/// If the product is already present its quantity is incremented by
/// `quantity`; otherwise a new item is appended, preserving insertion
/// order.
pub fn add_item(items: &mut Vec<CartItem>, product_id: ProductId, quantity: u32) {
    if let Some(item) = items.iter_mut().find(|item| item.product_id == product_id) {
        item.quantity += quantity;
    } else {
        items.push(CartItem {
            product_id,
            quantity,
        });
    }
}

/// Overwrite the quantity of an existing item.
///
/// Returns `false` if the product is not in the list; the list is left
/// unchanged in that case.
pub fn set_quantity(items: &mut [CartItem], product_id: &ProductId, quantity: u32) -> bool {
    match items
        .iter_mut()
        .find(|item| &item.product_id == product_id)
    {
        Some(item) => {
            item.quantity = quantity;
            true
        }
        None => false,
    }
}

/// Remove a product from the item list.
///
/// Removing a product that is not present is a no-op.
pub fn remove_item(items: &mut Vec<CartItem>, product_id: &ProductId) {
    items.retain(|item| &item.product_id != product_id);
}

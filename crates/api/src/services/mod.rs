//! Business logic services for the API.
//!
//! # Services
//!
//! - `auth` - Account registration and login
//! - `cart` - Cart operations (the merge/overwrite item-list engine)

pub mod auth;
pub mod cart;

pub use auth::AuthService;
pub use cart::CartService;

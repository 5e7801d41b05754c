//! Domain models for the API.
//!
//! These are the wire-facing record types: `Product` and `CartItem`
//! serialize camelCase exactly as they appear in responses, while `User`
//! stays server-side (responses are shaped per-route so the password hash
//! never leaves the process).

pub mod cart;
pub mod product;
pub mod user;

pub use cart::CartItem;
pub use product::Product;
pub use user::User;

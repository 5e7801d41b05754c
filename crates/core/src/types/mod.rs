//! Core types for Clementine.
//!
//! Newtype wrappers that keep entity references type-safe across crates.

pub mod id;

pub use id::{ProductId, UserId};

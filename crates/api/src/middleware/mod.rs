//! Request extractors for the API.

pub mod identity;

pub use identity::CallerIdentity;

//! Integration tests for Clementine.
//!
//! # Running Tests
//!
//! The tests in `tests/` drive a live server over HTTP and are `#[ignore]`d
//! by default so `cargo test` stays green without services.
//!
//! ```bash
//! # With PostgreSQL running: migrate and seed
//! cargo run -p clementine-cli -- migrate
//! cargo run -p clementine-cli -- seed products
//!
//! # Start the API
//! cargo run -p clementine-api &
//!
//! # Run integration tests
//! cargo test -p clementine-integration-tests -- --ignored
//! ```
//!
//! # Configuration
//!
//! - `API_BASE_URL` - Base URL of the running server (default: `http://localhost:5328`)
//!
//! # Test Categories
//!
//! - `api_products` - Catalog filtering, detail lookup, related products
//! - `api_cart` - Item-list merge/overwrite/remove semantics
//! - `api_auth` - Registration and login

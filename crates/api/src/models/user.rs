//! Account domain type.

use chrono::{DateTime, Utc};

/// A registered account (domain type).
///
/// Deliberately not `Serialize`: responses are shaped per-route and must
/// never carry the password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Email address, unique across accounts.
    pub email: String,
    /// Argon2id PHC string for the account password.
    pub password_hash: String,
    /// Display name; empty when not supplied at registration.
    pub name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

//! Account registration and login.
//!
//! Passwords are stored as Argon2id PHC strings and login verifies the
//! hash. The token returned on login is an opaque placeholder that clients
//! store and echo back; the server never inspects it.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use crate::db::{RepositoryError, UserRepository};
use crate::models::User;

/// Opaque token issued on every successful login.
pub const PLACEHOLDER_TOKEN: &str = "sample_jwt_token";

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Required registration field missing or empty.
    #[error("invalid user data")]
    InvalidUserData,

    /// Required login field missing or empty.
    #[error("missing credentials")]
    MissingCredentials,

    /// Email not registered, or password mismatch.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Email already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Account service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// `name` defaults to the empty string when not supplied.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUserData` if email or password is missing.
    /// Returns `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        name: Option<&str>,
    ) -> Result<User, AuthError> {
        let (Some(email), Some(password)) = (non_empty(email), non_empty(password)) else {
            return Err(AuthError::InvalidUserData);
        };
        let name = name.unwrap_or("");

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(email, &password_hash, name)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Log in with email and password.
    ///
    /// Returns the user and the opaque session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if a field is missing.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<(User, &'static str), AuthError> {
        let (Some(email), Some(password)) = (non_empty(email), non_empty(password)) else {
            return Err(AuthError::MissingCredentials);
        };

        let user = self
            .users
            .get_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok((user, PLACEHOLDER_TOKEN))
    }
}

/// Treat empty strings like absent fields.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

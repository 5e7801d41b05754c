//! Caller identity extraction.
//!
//! Cart scoping identity comes from the `x-user-id` request header. Callers
//! that send no header (or an empty one) all share the literal
//! `default_user` identity; there is no session binding, so that cart is
//! mutable by every anonymous caller.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use clementine_core::UserId;

/// Name of the header carrying the caller's identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity shared by callers that do not identify themselves.
pub const DEFAULT_USER: &str = "default_user";

/// Extractor for the caller's cart identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CallerIdentity(user_id): CallerIdentity) -> impl IntoResponse {
///     format!("cart for {user_id}")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub UserId);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_USER);

        Ok(Self(UserId::new(user_id)))
    }
}

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::TokenError;
use crate::database::models::user::UserId;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

pub const TOKEN_MISSING: &str = "Token is missing!";
pub const TOKEN_INVALID: &str = "Token is invalid or expired!";

/// Identity resolved from a bearer token, available to handlers as an
/// `Extension<CurrentUser>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header
    #[error("Token is missing!")]
    MissingToken,

    #[error("Token is invalid or expired!")]
    InvalidToken(#[source] TokenError),

    /// Token verified but its user no longer exists
    #[error("Token is invalid or expired!")]
    UnknownUser(UserId),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Guard for customer routes: auth failures answer 403.
pub async fn require_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(&state, &headers, request, next, ApiError::Forbidden).await
}

/// Guard for the profile route: auth failures answer 401.
pub async fn require_token_for_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    guard(&state, &headers, request, next, ApiError::Unauthorized).await
}

async fn guard(
    state: &AppState,
    headers: &HeaderMap,
    mut request: Request,
    next: Next,
    reject: fn(String) -> ApiError,
) -> Result<Response, ApiError> {
    match authenticate(state, headers).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(AuthError::Database(e)) => Err(e.into()),
        Err(e) => {
            warn!("Rejected request to {}: {:?}", request.uri().path(), e);
            Err(reject(e.to_string()))
        }
    }
}

/// Verify the bearer token and resolve its user against the credential store.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, AuthError> {
    let token = extract_bearer(headers).ok_or(AuthError::MissingToken)?;

    let claims = state
        .tokens()
        .verify(token)
        .map_err(AuthError::InvalidToken)?;

    let user = state
        .credentials()
        .find_by_id(claims.id)
        .await?
        .ok_or(AuthError::UnknownUser(claims.id))?;

    debug!("Authenticated user {}", user.id);
    Ok(CurrentUser {
        id: user.id,
        email: user.email,
    })
}

/// Token from an `Authorization: Bearer <token>` header. A missing header, a
/// different scheme or an empty token all count as no token.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(&headers("bearer abc")), Some("abc"));
    }

    #[test]
    fn malformed_headers_yield_no_token() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("Bearer")), None);
        assert_eq!(extract_bearer(&headers("Bearer   ")), None);
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(&headers("abc.def.ghi")), None);
    }

    #[test]
    fn missing_and_invalid_tokens_have_distinct_messages() {
        assert_eq!(AuthError::MissingToken.to_string(), TOKEN_MISSING);
        assert_eq!(AuthError::InvalidToken(TokenError::Expired).to_string(), TOKEN_INVALID);
        assert_eq!(AuthError::UnknownUser(3).to_string(), TOKEN_INVALID);
    }
}

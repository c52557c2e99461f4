//! Browser session tracking
//!
//! History is scoped to a `medpipe_session` cookie holding a random UUID. The
//! middleware issues the cookie on the first response and stashes the parsed
//! id in request extensions, where the [`SessionId`] extractor picks it up.
//! Sessions live only as long as the server process; nothing is persisted.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "medpipe_session";

/// Identifier of the browser session a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| ApiError::internal("Session middleware is not installed"))
    }
}

/// Session middleware
///
/// Reuses the session id from the request cookie when present, otherwise
/// generates a fresh one and sets the cookie on the response.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let existing = parse_session_cookie(request.headers());
    let session_id = existing.unwrap_or_else(Uuid::new_v4);

    request.extensions_mut().insert(SessionId(session_id));

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session_id
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

/// Extract the session id from the `Cookie` header, if any
fn parse_session_cookie(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

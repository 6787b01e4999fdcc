use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use thiserror::Error;

use crate::auth::{Payload, TokenError, TokenMaker};
use crate::error::ApiError;

pub const AUTH_TYPE_BEARER: &str = "Bearer";

/// Reasons a request fails authentication
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header is not provided")]
    MissingHeader,

    #[error("invalid authorization header format")]
    MalformedHeader,

    #[error("unsupported authorization type {0}")]
    UnsupportedType(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Verified token payload attached to an authenticated request
#[derive(Debug, Clone)]
pub struct AuthPayload(pub Payload);

#[async_trait]
impl<S> FromRequestParts<S> for AuthPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPayload>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

/// Bearer token middleware: rejects the request with 401 unless the
/// `Authorization` header carries a token the maker accepts.
pub async fn auth_middleware(
    State(token_maker): State<Arc<dyn TokenMaker>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let payload = authenticate(request.headers(), token_maker.as_ref()).map_err(|e| {
        tracing::debug!("Rejected request to {}: {}", request.uri().path(), e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthPayload(payload));
    Ok(next.run(request).await)
}

/// Run the header checks in order, then verify the credential
pub fn authenticate(headers: &HeaderMap, token_maker: &dyn TokenMaker) -> Result<Payload, AuthError> {
    let token = extract_bearer_token(headers)?;
    Ok(token_maker.verify_token(token)?)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingHeader),
    };

    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let fields: Vec<&str> = value.split_whitespace().collect();
    let [auth_type, token] = fields.as_slice() else {
        return Err(AuthError::MalformedHeader);
    };

    if *auth_type != AUTH_TYPE_BEARER {
        return Err(AuthError::UnsupportedType((*auth_type).to_string()));
    }

    Ok(*token)
}

use crate::{models::Identity, services::token_service::TokenService, utils::AuthError};
use actix_web::{http::header::AUTHORIZATION, HttpRequest};

/// Raw `Authorization` header of the inbound request, carried into the
/// GraphQL execution context.
#[derive(Debug, Clone, Default)]
pub struct AuthHeader(pub Option<String>);

impl AuthHeader {
    pub fn from_request(req: &HttpRequest) -> Self {
        AuthHeader(authorization_header(req))
    }

    pub fn identity(&self, tokens: &TokenService) -> Result<Identity, AuthError> {
        identity_from_header(self.0.as_deref(), tokens)
    }
}

pub fn authorization_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Accepts exactly `Bearer <token>`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingOrMalformedHeader)?;
    let parts: Vec<&str> = header.split(' ').collect();

    match parts.as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(*token),
        _ => Err(AuthError::MissingOrMalformedHeader),
    }
}

pub fn identity_from_header(
    header: Option<&str>,
    tokens: &TokenService,
) -> Result<Identity, AuthError> {
    let token = bearer_token(header)?;
    tokens.verify(token)
}

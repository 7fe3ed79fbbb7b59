use axum::http::{header, HeaderMap};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::{
    application::error::ApplicationError,
    domain::models::principal::{Principal, Role},
};

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no credentials supplied")]
    MissingCredentials,

    #[error("malformed {0} header")]
    MalformedHeader(&'static str),

    #[error("invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("invalid API key")]
    InvalidApiKey,
}

impl From<AuthError> for ApplicationError {
    fn from(error: AuthError) -> Self {
        warn!("Authentication failed: {}", error);
        ApplicationError::Unauthorized
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, alias = "role")]
    roles: Option<RoleClaim>,
}

impl Claims {
    fn roles(&self) -> Vec<Role> {
        match &self.roles {
            None => Vec::new(),
            Some(RoleClaim::One(raw)) => Role::parse(raw).into_iter().collect(),
            Some(RoleClaim::Many(raw)) => raw.iter().filter_map(|r| Role::parse(r)).collect(),
        }
    }
}

/// Resolves request credentials into a [`Principal`].
///
/// A bearer token wins over an API key when both are present.
pub struct Authenticator {
    decoding_key: DecodingKey,
    validation: Validation,
    api_key: String,
}

impl Authenticator {
    pub fn new(jwt_secret: &str, api_key: impl Into<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            api_key: api_key.into(),
        }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        if let Some(value) = headers.get(header::AUTHORIZATION) {
            let token = value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(AuthError::MalformedHeader("Authorization"))?;
            return self.verify_token(token);
        }

        if let Some(value) = headers.get(API_KEY_HEADER) {
            let provided = value
                .to_str()
                .map_err(|_| AuthError::MalformedHeader(API_KEY_HEADER))?;
            return if keys_match(provided.as_bytes(), self.api_key.as_bytes()) {
                Ok(Principal::Reseller)
            } else {
                Err(AuthError::InvalidApiKey)
            };
        }

        Err(AuthError::MissingCredentials)
    }

    fn verify_token(&self, token: &str) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let roles = data.claims.roles();
        Ok(Principal::User {
            subject: data.claims.sub,
            roles,
        })
    }
}

/// Compares every byte regardless of where the first mismatch is.
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

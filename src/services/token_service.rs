use crate::{
    config::DEFAULT_JWT_LIFE_TIME_DAYS,
    models::{Identity, Role, User},
    utils::{AppError, AuthError},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub exp: i64, // expiration, seconds since epoch
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    life_time: Duration,
}

impl TokenService {
    /// Lifetimes too large for a `Duration` fall back to the default.
    pub fn new(secret: impl Into<String>, life_time_days: i64) -> Self {
        let life_time = Duration::try_days(life_time_days).unwrap_or_else(|| {
            log::warn!("Token lifetime of {} days is out of range", life_time_days);
            Duration::days(DEFAULT_JWT_LIFE_TIME_DAYS)
        });

        Self {
            secret: secret.into(),
            life_time,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let expires = Utc::now()
            .checked_add_signed(self.life_time)
            .ok_or_else(|| AppError::Internal("Token expiry is out of range".to_string()))?;

        let claims = Claims {
            uid: user.id.to_hex(),
            email: user.email.clone(),
            role: user.role,
            exp: expires.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidSignature => {
                AuthError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => AuthError::Expired,
            _ => AuthError::Malformed,
        })?;

        Ok(Identity {
            uid: claims.uid,
            email: claims.email,
            role: claims.role,
        })
    }
}

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ADMIN_SUBJECT: &str = "admin";

/// Longest admin session a token may carry (one year)
pub const MAX_TOKEN_TTL_SECS: u64 = 366 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect password")]
    InvalidPassword,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token is not an admin token")]
    WrongSubject,

    #[error("Token lifetime of {0}s is outside 1..={max}s", max = MAX_TOKEN_TTL_SECS)]
    InvalidTtl(u64),
}

/// Claims carried by an admin token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Admin password gate issuing HS256 session tokens
#[derive(Clone)]
pub struct AdminAuth {
    password: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AdminAuth {
    pub fn new(password: impl Into<String>, jwt_secret: &str, token_ttl_secs: u64) -> Result<Self, AuthError> {
        let token_ttl = Some(token_ttl_secs)
            .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(Duration::try_seconds)
            .ok_or(AuthError::InvalidTtl(token_ttl_secs))?;

        Ok(Self {
            password: password.into(),
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl,
        })
    }

    /// Exchange the admin password for a token and its expiry
    pub fn login(&self, password: &str) -> Result<(String, DateTime<Utc>), AuthError> {
        if !constant_time_eq(password.as_bytes(), self.password.as_bytes()) {
            return Err(AuthError::InvalidPassword);
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| AuthError::InvalidTtl(self.token_ttl.num_seconds().unsigned_abs()))?;
        let claims = AdminClaims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok((token, expires_at))
    }

    pub fn verify(&self, token: &str) -> Result<AdminClaims, AuthError> {
        let data = decode::<AdminClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))?;

        if data.claims.sub != ADMIN_SUBJECT {
            return Err(AuthError::WrongSubject);
        }

        Ok(data.claims)
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn verify_header(&self, header: Option<&str>) -> Result<AdminClaims, AuthError> {
        let token = header
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.verify(token)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Role, UserId};

const SECONDS_PER_HOUR: i64 = 3600;

/// Token type enumeration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token for API authentication (short-lived)
    Access,
    /// Refresh token for obtaining new access tokens (long-lived)
    Refresh,
}

/// JWT Claims structure containing principal information and token metadata
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user UUID)
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates new claims valid for `expiration_hours` from now
    pub fn new(
        user_id: UserId,
        email: impl Into<String>,
        role: Role,
        token_type: TokenType,
        expiration_hours: i64,
    ) -> Self {
        let now = jiff::Timestamp::now().as_second();

        Self {
            sub: user_id.to_string(),
            email: email.into(),
            role,
            token_type,
            iat: now,
            exp: now + expiration_hours * SECONDS_PER_HOUR,
        }
    }

    /// Parses the subject as a user id.
    pub fn user_id(&self) -> AppResult<UserId> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Token subject is not a valid user id"))
    }
}

/// Signs `claims` with the shared HS256 secret
pub fn encode_claims(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Generates an access token for a principal
///
/// Login is handled elsewhere; this is used by operators and tests to mint
/// tokens the server will accept.
pub fn generate_access_token(
    user_id: UserId,
    email: impl Into<String>,
    role: Role,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(user_id, email, role, TokenType::Access, expiration_hours);
    encode_claims(&claims, secret)
}

/// Validates and decodes a JWT token
///
/// # Errors
/// `Unauthorized` when the signature, expiry or token type does not check out.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    use jsonwebtoken::errors::ErrorKind;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized("Token has expired"),
        ErrorKind::InvalidToken => AppError::unauthorized("Invalid token"),
        ErrorKind::InvalidSignature => AppError::unauthorized("Invalid token signature"),
        _ => AppError::unauthorized(format!("Token validation failed: {}", e)),
    })?;

    if let Some(expected) = expected_type.filter(|t| *t != claims.token_type) {
        return Err(AppError::unauthorized(format!(
            "Invalid token type: expected {:?}, got {:?}",
            expected, claims.token_type
        )));
    }

    Ok(claims)
}

/// Validates an access token
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

// src/services/credentials.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Claims};

/// Password hashing and verification.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, AppError>;
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}

pub type DynPasswordHasher = Arc<dyn PasswordHasher>;

/// bcrypt, run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("hashing task failed: {}", e))??;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("password verification task failed: {}", e))??;
        Ok(valid)
    }
}

/// Issues an HS256 access token for `user_id`.
pub fn encode_token(secret: &str, user_id: Uuid, ttl: Duration) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Returns the user id of a valid, unexpired token.
pub fn decode_token(secret: &str, token: &str) -> Result<Uuid, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trips_the_subject() {
        let user_id = Uuid::new_v4();
        let token = encode_token(SECRET, user_id, Duration::minutes(30)).unwrap();
        assert_eq!(decode_token(SECRET, &token).unwrap(), user_id);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = encode_token("another-secret", Uuid::new_v4(), Duration::minutes(30)).unwrap();
        assert!(matches!(decode_token(SECRET, &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s leeway.
        let token = encode_token(SECRET, Uuid::new_v4(), Duration::minutes(-5)).unwrap();
        assert!(matches!(decode_token(SECRET, &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode_token(SECRET, "not.a.jwt"), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn bcrypt_hash_verifies() {
        // Minimum cost keeps the test fast.
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("secret1").await.unwrap();
        assert!(hasher.verify("secret1", &hash).await.unwrap());
        assert!(!hasher.verify("secret2", &hash).await.unwrap());
    }
}

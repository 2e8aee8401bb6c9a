use chrono::{DateTime, TimeDelta, Utc};
use rand::RngCore;
use std::future::Future;

use crate::types::user::UserId;

/// Number of random bytes behind a token key. Keys are hex encoded, so they
/// are twice this long.
const KEY_BYTES: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) key: String,
    pub(crate) user: UserId,
    pub(crate) created_at: DateTime<Utc>,
}

impl Token {
    pub(crate) fn new(user: UserId) -> Self {
        Self {
            key: generate_key(),
            user,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn expired(&self, lifespan: TimeDelta, now: DateTime<Utc>) -> bool {
        is_expired(self.created_at, lifespan, now)
    }
}

/// A token is expired once `lifespan` has fully elapsed since `created_at`;
/// the boundary itself counts as expired.
pub(crate) fn is_expired(created_at: DateTime<Utc>, lifespan: TimeDelta, now: DateTime<Utc>) -> bool {
    now - created_at >= lifespan
}

pub(crate) fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("Token already exists for this user or key")]
    Conflict,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Durable CRUD for tokens. Stores carry no policy; they only guarantee that
/// keys are unique and that a user owns at most one token, rejecting any
/// `create` that would break either rule with [`StoreError::Conflict`].
pub(crate) trait TokenStore: Send + Sync {
    fn find_by_user(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Option<Token>, StoreError>> + Send;

    fn find_by_key(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Token>, StoreError>> + Send;

    fn create(&self, user: UserId) -> impl Future<Output = Result<Token, StoreError>> + Send;

    /// Removing a token that is already gone is not an error.
    fn delete(&self, token: &Token) -> impl Future<Output = Result<(), StoreError>> + Send;
}

use chrono::{TimeDelta, Utc};

use crate::core::error::Error;
use crate::token::store::{StoreError, TokenStore};
use crate::types::user::UserId;

/// Issuance policy: how long a token lives and whether every login rotates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TokenPolicy {
    pub(crate) lifespan: TimeDelta,
    pub(crate) always_reset: bool,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            lifespan: TimeDelta::minutes(90),
            always_reset: true,
        }
    }
}

/// Whether an existing live token may be handed out again or must be replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reuse {
    Policy,
    Live,
}

#[derive(Clone, Debug)]
pub(crate) struct TokenController<T: TokenStore> {
    token_store: T,
    policy: TokenPolicy,
}

impl<T: TokenStore> TokenController<T> {
    pub(crate) fn new(token_store: T, policy: TokenPolicy) -> Self {
        Self {
            token_store,
            policy,
        }
    }

    /// Returns a live token key for `user`, creating or rotating the stored
    /// token as the policy requires.
    ///
    /// When the store rejects a create because another request won the race
    /// for this user, the lookup is repeated once and a live token found there
    /// is adopted as-is, so concurrent logins settle on a single key.
    pub(crate) async fn issue(&self, user: UserId) -> Result<String, Error> {
        match self.try_issue(user, Reuse::Policy).await {
            Err(StoreError::Conflict) => {
                tracing::warn!(user, "token create conflicted, retrying once");
                Ok(self.try_issue(user, Reuse::Live).await?)
            }
            result => Ok(result?),
        }
    }

    async fn try_issue(&self, user: UserId, reuse: Reuse) -> Result<String, StoreError> {
        let Some(existing) = self.token_store.find_by_user(user).await? else {
            let token = self.token_store.create(user).await?;
            tracing::debug!(user, "issued first token");
            return Ok(token.key);
        };

        let expired = existing.expired(self.policy.lifespan, Utc::now());

        if expired || (reuse == Reuse::Policy && self.policy.always_reset) {
            self.token_store.delete(&existing).await?;
            let token = self.token_store.create(user).await?;
            tracing::debug!(user, expired, "rotated token");
            return Ok(token.key);
        }

        tracing::debug!(user, "reusing live token");
        Ok(existing.key)
    }

    /// Resolves a token key to its owner. Expired tokens never authenticate;
    /// their records are removed on a best-effort basis.
    pub(crate) async fn validate(&self, key: &str) -> Result<UserId, Error> {
        let token = self
            .token_store
            .find_by_key(key)
            .await?
            .ok_or(Error::InvalidToken)?;

        if token.expired(self.policy.lifespan, Utc::now()) {
            if let Err(e) = self.token_store.delete(&token).await {
                tracing::warn!("failed to remove expired token: {:?}", e);
            }
            return Err(Error::ExpiredToken);
        }

        Ok(token.user)
    }
}

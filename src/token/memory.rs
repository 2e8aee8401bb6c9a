use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::token::store::{StoreError, Token, TokenStore};
use crate::types::user::UserId;

#[derive(Debug, Default)]
struct Tokens {
    by_key: HashMap<String, Token>,
    by_user: HashMap<UserId, String>,
}

/// Token store kept entirely in memory. Both uniqueness rules are checked
/// and applied under a single write lock, mirroring the primary key and
/// unique index of the `tokens` table.
#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryTokenStore {
    tokens: Arc<RwLock<Tokens>>,
}

impl MemoryTokenStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store a prepared token as-is, bypassing key generation and timestamping.
    pub(crate) async fn insert(&self, token: Token) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().await;

        if tokens.by_key.contains_key(&token.key) || tokens.by_user.contains_key(&token.user) {
            return Err(StoreError::Conflict);
        }

        tokens.by_user.insert(token.user, token.key.clone());
        tokens.by_key.insert(token.key.clone(), token);

        Ok(())
    }

    pub(crate) async fn count_for_user(&self, user: UserId) -> usize {
        self.tokens
            .read()
            .await
            .by_key
            .values()
            .filter(|token| token.user == user)
            .count()
    }
}

impl TokenStore for MemoryTokenStore {
    async fn find_by_user(&self, user: UserId) -> Result<Option<Token>, StoreError> {
        let tokens = self.tokens.read().await;

        Ok(tokens
            .by_user
            .get(&user)
            .and_then(|key| tokens.by_key.get(key))
            .cloned())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Token>, StoreError> {
        Ok(self.tokens.read().await.by_key.get(key).cloned())
    }

    async fn create(&self, user: UserId) -> Result<Token, StoreError> {
        let token = Token::new(user);
        self.insert(token.clone()).await?;
        Ok(token)
    }

    async fn delete(&self, token: &Token) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().await;

        if let Some(removed) = tokens.by_key.remove(&token.key) {
            tokens.by_user.remove(&removed.user);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryTokenStore::new();

        let token = store.create(1).await.unwrap();

        assert_eq!(store.find_by_user(1).await.unwrap(), Some(token.clone()));
        assert_eq!(store.find_by_key(&token.key).await.unwrap(), Some(token));
        assert_eq!(store.find_by_user(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_second_create_for_user_conflicts() {
        let store = MemoryTokenStore::new();

        store.create(1).await.unwrap();

        assert!(matches!(store.create(1).await, Err(StoreError::Conflict)));
        assert_eq!(store.count_for_user(1).await, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryTokenStore::new();
        let token = store.create(1).await.unwrap();

        store.delete(&token).await.unwrap();
        store.delete(&token).await.unwrap();

        assert_eq!(store.find_by_key(&token.key).await.unwrap(), None);
        assert_eq!(store.find_by_user(1).await.unwrap(), None);
        assert!(store.create(1).await.is_ok());
    }
}

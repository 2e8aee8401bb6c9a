use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::token::store::StoreError;
use crate::types::user::{AuthorizedUser, UserId};
use crate::user::store::UserStore;

#[derive(Clone, Debug, Default)]
pub(crate) struct MemoryUserStore {
    users: Arc<RwLock<HashMap<UserId, AuthorizedUser>>>,
}

impl MemoryUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds an account with the next free id.
    pub(crate) async fn add(
        &self,
        username: &str,
        password_hash: &str,
        is_active: bool,
    ) -> AuthorizedUser {
        let mut users = self.users.write().await;

        let user = AuthorizedUser {
            id: users.keys().max().copied().unwrap_or_default() + 1,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            is_active,
        };
        users.insert(user.id, user.clone());

        user
    }

    pub(crate) async fn set_active(&self, id: UserId, is_active: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_active = is_active;
        }
    }

    pub(crate) async fn remove(&self, id: UserId) {
        self.users.write().await.remove(&id);
    }
}

impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AuthorizedUser>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<AuthorizedUser>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

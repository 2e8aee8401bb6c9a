use bcrypt::BcryptError;
use std::sync::Arc;

use crate::core::error::{ConfigError, Error};
use crate::types::request::Credentials;
use crate::types::user::{AuthorizedUser, UserId};
use crate::user::store::UserStore;

const DUMMY_PASSWORD: &str = "unusable-password";

#[derive(Clone, Debug)]
pub(crate) struct UserController<U: UserStore> {
    user_store: U,
    // checked against when the username is unknown, so every failed login
    // pays for one bcrypt verification
    dummy_hash: Arc<str>,
}

impl<U: UserStore> UserController<U> {
    /// `cost` should match the cost of the stored password hashes.
    pub(crate) fn new(user_store: U, cost: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            user_store,
            dummy_hash: bcrypt::hash(DUMMY_PASSWORD, cost)?.into(),
        })
    }

    pub(crate) async fn get_user_by_id(&self, id: UserId) -> Result<Option<AuthorizedUser>, Error> {
        Ok(self.user_store.find_by_id(id).await?)
    }

    /// Checks a username/password pair. Unknown users, wrong passwords and
    /// inactive accounts all fail with the same error and the same hashing work.
    pub(crate) async fn verify_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthorizedUser, Error> {
        let Some(user) = self
            .user_store
            .find_by_username(&credentials.username)
            .await?
        else {
            check_password(&credentials.password, &self.dummy_hash)?;
            return Err(Error::InvalidCredentials);
        };

        if !check_password(&credentials.password, &user.password_hash)? || !user.is_active {
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }
}

/// A stored hash that bcrypt cannot read never matches.
fn check_password(password: &str, hash: &str) -> Result<bool, Error> {
    match bcrypt::verify(password, hash) {
        Ok(matches) => Ok(matches),
        Err(
            BcryptError::InvalidHash(_)
            | BcryptError::InvalidPrefix(_)
            | BcryptError::InvalidCost(_)
            | BcryptError::InvalidBase64(_),
        ) => {
            tracing::warn!("stored password hash is not a bcrypt hash");
            Ok(false)
        }
        Err(e) => Err(Error::Bcrypt(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::memory::MemoryUserStore;
    use std::time::Instant;

    /// bcrypt's minimum cost; the crate keeps its own `MIN_COST` private.
    const BCRYPT_MIN_COST: u32 = 4;

    async fn controller(cost: u32) -> (UserController<MemoryUserStore>, AuthorizedUser) {
        let users = MemoryUserStore::new();
        let hash = bcrypt::hash("correct horse", cost).unwrap();
        let user = users.add("alice", &hash, true).await;

        (UserController::new(users, cost).unwrap(), user)
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let (controller, alice) = controller(BCRYPT_MIN_COST).await;

        let user = controller
            .verify_credentials(&credentials("alice", "correct horse"))
            .await
            .unwrap();

        assert_eq!(user.id, alice.id);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let (controller, alice) = controller(BCRYPT_MIN_COST).await;

        assert!(matches!(
            controller
                .verify_credentials(&credentials("alice", "wrong"))
                .await,
            Err(Error::InvalidCredentials)
        ));
        assert!(matches!(
            controller
                .verify_credentials(&credentials("mallory", "correct horse"))
                .await,
            Err(Error::InvalidCredentials)
        ));

        controller.user_store.set_active(alice.id, false).await;

        assert!(matches!(
            controller
                .verify_credentials(&credentials("alice", "correct horse"))
                .await,
            Err(Error::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_uses_configured_cost() {
        let controller = UserController::new(MemoryUserStore::new(), 5).unwrap();

        assert!(controller.dummy_hash.starts_with("$2b$05$"));
    }

    #[tokio::test]
    async fn test_unknown_user_pays_hashing_cost() {
        let (controller, _) = controller(8).await;

        let start = Instant::now();
        let _ = controller
            .verify_credentials(&credentials("alice", "wrong"))
            .await;
        let wrong_password = start.elapsed();

        let start = Instant::now();
        let _ = controller
            .verify_credentials(&credentials("mallory", "wrong"))
            .await;
        let unknown_user = start.elapsed();

        assert!(unknown_user * 10 >= wrong_password);
    }

    #[tokio::test]
    async fn test_foreign_hash_is_a_mismatch() {
        let users = MemoryUserStore::new();
        users
            .add(
                "bob",
                "pbkdf2_sha256$600000$c2FsdA$aGFzaGhhc2hoYXNo",
                true,
            )
            .await;
        let controller = UserController::new(users, BCRYPT_MIN_COST).unwrap();

        assert!(matches!(
            controller.verify_credentials(&credentials("bob", "secret")).await,
            Err(Error::InvalidCredentials)
        ));
    }
}

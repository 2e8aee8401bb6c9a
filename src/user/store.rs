use std::future::Future;

use crate::token::store::StoreError;
use crate::types::user::{AuthorizedUser, UserId};

/// Read-only lookup of user accounts. Accounts are provisioned elsewhere.
pub(crate) trait UserStore: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<AuthorizedUser>, StoreError>> + Send;

    fn find_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<AuthorizedUser>, StoreError>> + Send;
}

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::token::store::StoreError;
use crate::types::user::{AuthorizedUser, UserId};
use crate::user::store::UserStore;

#[derive(Clone, Debug)]
pub(crate) struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AuthorizedUser>, StoreError> {
        let user = sqlx::query(
            "SELECT id, username, password_hash, is_active FROM users WHERE username = $1;",
        )
        .bind(username)
        .map(map_user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<AuthorizedUser>, StoreError> {
        let user =
            sqlx::query("SELECT id, username, password_hash, is_active FROM users WHERE id = $1;")
                .bind(id)
                .map(map_user)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }
}

fn map_user(row: PgRow) -> AuthorizedUser {
    AuthorizedUser {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        is_active: row.get("is_active"),
    }
}

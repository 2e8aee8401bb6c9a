use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::token::store::{StoreError, Token, TokenStore};
use crate::types::user::UserId;

#[derive(Clone, Debug)]
pub(crate) struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TokenStore for PgTokenStore {
    async fn find_by_user(&self, user: UserId) -> Result<Option<Token>, StoreError> {
        let token = sqlx::query("SELECT key, user_id, created_at FROM tokens WHERE user_id = $1;")
            .bind(user)
            .map(map_token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(token)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Token>, StoreError> {
        let token = sqlx::query("SELECT key, user_id, created_at FROM tokens WHERE key = $1;")
            .bind(key)
            .map(map_token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(token)
    }

    async fn create(&self, user: UserId) -> Result<Token, StoreError> {
        let token = Token::new(user);

        match sqlx::query("INSERT INTO tokens (key, user_id, created_at) VALUES ($1, $2, $3);")
            .bind(&token.key)
            .bind(token.user)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
        {
            Ok(_) => Ok(token),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::Conflict)
            }
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    async fn delete(&self, token: &Token) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM tokens WHERE key = $1;")
            .bind(&token.key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_token(row: PgRow) -> Token {
    Token {
        key: row.get("key"),
        user: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

use chrono::TimeDelta;
use serde::Deserialize;

use crate::controllers::token::TokenPolicy;
use crate::core::error::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    #[serde(default = "default_database_port")]
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    #[serde(default = "default_log_level")]
    pub(crate) log_level: String,
    #[serde(default = "default_port")]
    pub(crate) port: u16,
    #[serde(default = "default_token_lifespan_ms")]
    pub(crate) token_lifespan_ms: u64,
    #[serde(default = "default_always_reset_token")]
    pub(crate) always_reset_token: bool,
    #[serde(default = "default_bcrypt_cost")]
    pub(crate) bcrypt_cost: u32,
}

fn default_database_port() -> u16 {
    5432
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_port() -> u16 {
    8000
}

// 90 minutes
fn default_token_lifespan_ms() -> u64 {
    5_400_000
}

fn default_always_reset_token() -> bool {
    true
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Args {
    pub(crate) fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }

    pub(crate) fn token_policy(&self) -> Result<TokenPolicy, ConfigError> {
        let lifespan = i64::try_from(self.token_lifespan_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .filter(|lifespan| *lifespan > TimeDelta::zero())
            .ok_or(ConfigError::InvalidLifespan(self.token_lifespan_ms))?;

        Ok(TokenPolicy {
            lifespan,
            always_reset: self.always_reset_token,
        })
    }
}

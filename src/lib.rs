pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod token;
pub(crate) mod types;
pub(crate) mod user;
pub(crate) mod utils;

use config::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::config::Args;
use crate::core::error::ConfigError as Error;
use crate::core::state::AppState;
use crate::token::postgres::PgTokenStore;
use crate::user::postgres::PgUserStore;

pub async fn run() -> Result<(), Error> {
    let config = Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("EXPIRING_TOKENS"))
        .build()
        .map_err(Error::Config)?;

    let config = config.try_deserialize::<Args>().map_err(Error::Config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let policy = config.token_policy()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url())
        .await
        .map_err(Error::Sql)?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(Error::DatabaseMigration)?;

    let state: AppState = AppState::new(
        PgTokenStore::new(pool.clone()),
        PgUserStore::new(pool),
        policy,
        config.bcrypt_cost,
    )?;

    let app = routes::router::routes(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::info!(
        lifespan_ms = policy.lifespan.num_milliseconds(),
        always_reset = policy.always_reset,
        "listening on port {}",
        config.port
    );

    axum::serve(listener, app).await.map_err(Error::IO)?;

    Ok(())
}

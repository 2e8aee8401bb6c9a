use crate::controllers::token::{TokenController, TokenPolicy};
use crate::controllers::user::UserController;
use crate::core::error::ConfigError;
use crate::token::postgres::PgTokenStore;
use crate::token::store::TokenStore;
use crate::user::postgres::PgUserStore;
use crate::user::store::UserStore;

#[derive(Clone, Debug)]
pub(crate) struct AppState<T: TokenStore = PgTokenStore, U: UserStore = PgUserStore> {
    pub(crate) user_controller: UserController<U>,
    pub(crate) token_controller: TokenController<T>,
}

impl<T: TokenStore, U: UserStore> AppState<T, U> {
    pub(crate) fn new(
        token_store: T,
        user_store: U,
        policy: TokenPolicy,
        bcrypt_cost: u32,
    ) -> Result<Self, ConfigError> {
        Ok(AppState {
            user_controller: UserController::new(user_store, bcrypt_cost)?,
            token_controller: TokenController::new(token_store, policy),
        })
    }
}

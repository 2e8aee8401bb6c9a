use serde::Serialize;

use crate::types::user::{UserId, Username};

#[derive(Debug, Serialize)]
pub(crate) struct Token {
    pub(crate) token: String,
}

impl Token {
    pub(crate) fn new(key: String) -> Self {
        Self { token: key }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct User {
    pub(crate) id: UserId,
    pub(crate) username: Username,
}

impl User {
    pub(crate) fn new(id: UserId, username: &str) -> Self {
        Self {
            id,
            username: username.to_owned(),
        }
    }
}

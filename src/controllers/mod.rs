pub(crate) mod token;
pub(crate) mod user;

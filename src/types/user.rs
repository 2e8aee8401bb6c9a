pub(crate) type UserId = i32;
pub(crate) type Username = String;

#[derive(Clone, Debug)]
pub(crate) struct AuthorizedUser {
    pub(crate) id: UserId,
    pub(crate) username: Username,
    pub(crate) password_hash: String,
    pub(crate) is_active: bool,
}

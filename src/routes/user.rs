use axum::Json;
use axum::extract::Extension;

use crate::types::response;
use crate::types::user::AuthorizedUser;

pub(crate) async fn me(Extension(user): Extension<AuthorizedUser>) -> Json<response::User> {
    Json(response::User::new(user.id, &user.username))
}

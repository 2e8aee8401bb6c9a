use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::token::store::TokenStore;
use crate::types::request::LoginData;
use crate::types::response;
use crate::user::store::UserStore;

pub(crate) async fn obtain_token<T: TokenStore, U: UserStore>(
    State(state): State<AppState<T, U>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<response::Token>, Error> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let credentials = LoginData::from_body(content_type, &body)?.validate()?;

    let user = state
        .user_controller
        .verify_credentials(&credentials)
        .await?;

    let key = state.token_controller.issue(user.id).await?;

    tracing::info!(user = %user.username, "issued token");

    Ok(Json(response::Token::new(key)))
}

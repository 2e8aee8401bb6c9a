use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Response, header};
use axum::middleware::Next;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::token::store::TokenStore;
use crate::user::store::UserStore;

const KEYWORDS: [&str; 2] = ["Token", "Bearer"];

/// Pulls the token key out of an `Authorization: Token <key>` header.
/// `Bearer` is accepted as an alternative keyword; any other scheme is
/// treated as if no credentials were sent.
pub(crate) fn token_from_headers(headers: &HeaderMap) -> Result<&str, Error> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?
        .to_str()
        .map_err(|_| {
            Error::InvalidTokenHeader("Token string should not contain invalid characters.")
        })?;

    let mut parts = auth_header.split_whitespace();

    match parts.next() {
        Some(keyword) if KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(keyword)) => (),
        _ => return Err(Error::NoCredentials),
    }

    match (parts.next(), parts.next()) {
        (None, _) => Err(Error::InvalidTokenHeader("No credentials provided.")),
        (Some(_), Some(_)) => Err(Error::InvalidTokenHeader(
            "Token string should not contain spaces.",
        )),
        (Some(key), None) => Ok(key),
    }
}

pub(crate) async fn authenticate<T: TokenStore, U: UserStore>(
    State(state): State<AppState<T, U>>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let key = token_from_headers(request.headers())?.to_owned();

    let user_id = state.token_controller.validate(&key).await?;

    let user = state
        .user_controller
        .get_user_by_id(user_id)
        .await?
        .filter(|user| user.is_active)
        .ok_or(Error::InactiveUser)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

use crate::core::error;
use crate::core::state::AppState;
use crate::routes::{auth, user};
use crate::token::store::TokenStore;
use crate::user::store::UserStore;
use crate::utils;
use axum::error_handling::HandleErrorLayer;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info_span;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn routes<T, U>(state: AppState<T, U>) -> Router
where
    T: TokenStore + Clone + 'static,
    U: UserStore + Clone + 'static,
{
    let authenticated_routes = Router::new()
        .route("/me", get(user::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authenticate::<T, U>,
        ));

    Router::new()
        .route("/obtain-token", post(auth::obtain_token::<T, U>))
        .route("/obtain-token/", post(auth::obtain_token::<T, U>))
        .merge(authenticated_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(HandleErrorLayer::new(error::handle_middleware_errors))
                .timeout(REQUEST_TIMEOUT),
        )
}

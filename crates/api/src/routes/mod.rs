//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod auth;
pub mod coins;
pub mod health;
pub mod info;
pub mod shop;

/// Creates the `/api` router.
///
/// `/auth` is public; everything else requires a bearer token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(coins::routes())
        .merge(shop::routes())
        .merge(info::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new().merge(auth::routes()).merge(protected_routes)
}

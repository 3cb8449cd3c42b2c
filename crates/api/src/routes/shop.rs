//! Merch purchase route.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use merchcoin_core::ledger::RedemptionRequest;

/// Creates the shop router. Both GET and POST buy an item.
pub fn routes() -> Router<AppState> {
    Router::new().route("/buy/{item}", get(buy).post(buy))
}

/// GET|POST /api/buy/{item} - Spend coins on a catalog item.
async fn buy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(item): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .ledger
        .redeem(RedemptionRequest::new(user.username(), item))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

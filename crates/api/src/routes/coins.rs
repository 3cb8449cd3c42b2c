//! Coin transfer route.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use merchcoin_core::ledger::TransferRequest;

/// Body of `POST /api/sendCoin`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendCoinRequest {
    /// Receiver username.
    pub to_user: String,
    /// Coins to send.
    pub amount: i64,
}

/// Creates the coin transfer router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sendCoin", post(send_coin))
}

/// POST /api/sendCoin - Move coins from the caller to another employee.
///
/// The sender is the token subject; the body only names the receiver.
async fn send_coin(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<SendCoinRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(payload) = payload?;

    state
        .ledger
        .transfer(TransferRequest::new(
            user.username(),
            payload.to_user,
            payload.amount,
        ))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

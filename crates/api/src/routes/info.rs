//! Wallet summary route.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::AuthUser;
use merchcoin_core::ledger::LedgerError;
use merchcoin_db::{EmployeeRepository, PurchaseLog, TransactionLog};
use merchcoin_shared::AppError;

/// Response of `GET /api/info`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    /// Current balance.
    pub coins: i64,
    /// Purchased items and counts.
    pub inventory: Vec<InventoryEntry>,
    /// Transfers in and out.
    pub coin_history: CoinHistoryResponse,
}

/// One inventory line.
#[derive(Debug, Serialize)]
pub struct InventoryEntry {
    /// Item name.
    #[serde(rename = "type")]
    pub item_type: String,
    /// How many were bought.
    pub quantity: u64,
}

/// Transfer history split by direction.
#[derive(Debug, Serialize)]
pub struct CoinHistoryResponse {
    /// Incoming transfers.
    pub received: Vec<ReceivedEntry>,
    /// Outgoing transfers.
    pub sent: Vec<SentEntry>,
}

/// One incoming transfer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedEntry {
    /// Sender username.
    pub from_user: String,
    /// Coins received.
    pub amount: i64,
}

/// One outgoing transfer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentEntry {
    /// Receiver username.
    pub to_user: String,
    /// Coins sent.
    pub amount: i64,
}

/// Creates the info router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/info", get(info))
}

/// GET /api/info - Balance, inventory, and transfer history of the caller.
async fn info(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<InfoResponse>> {
    let db = state.db.as_ref();
    let username = user.username();

    let coins = EmployeeRepository::new(db.clone())
        .balance_of(username)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .ok_or_else(|| LedgerError::Unauthorized(username.to_string()))?;

    let inventory = PurchaseLog::inventory_for(db, username)
        .await?
        .into_iter()
        .map(|line| InventoryEntry {
            item_type: line.item,
            quantity: line.quantity,
        })
        .collect();

    let history = TransactionLog::history_for(db, username).await?;

    Ok(Json(InfoResponse {
        coins,
        inventory,
        coin_history: CoinHistoryResponse {
            received: history
                .received
                .into_iter()
                .map(|r| ReceivedEntry {
                    from_user: r.from,
                    amount: r.amount,
                })
                .collect(),
            sent: history
                .sent
                .into_iter()
                .map(|r| SentEntry {
                    to_user: r.to,
                    amount: r.amount,
                })
                .collect(),
        },
    }))
}

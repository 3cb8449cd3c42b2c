//! Authentication route: login, registering the employee on first use.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use tracing::{error, info};

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use merchcoin_core::auth::{hash_password, validate_credentials, verify_password};
use merchcoin_db::{EmployeeRepository, Registration};
use merchcoin_shared::{AppError, AuthRequest, AuthResponse};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth", post(authenticate))
}

/// POST /api/auth - Verify credentials, or register, and return a token.
///
/// An unknown username is registered with the configured starting balance.
/// A wrong password for a known username is a conflict (409), not a 401.
async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(payload) = payload?;
    validate_credentials(&payload.username, &payload.password)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let repo = EmployeeRepository::new((*state.db).clone());

    let existing = repo.find_by_username(&payload.username).await.map_err(|e| {
        error!(error = %e, "Database error during authentication");
        AppError::Database(e.to_string())
    })?;

    let stored_hash = match existing {
        Some(employee) => employee.password_hash,
        None => {
            let hash = hash_password(&payload.password)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let registration = repo
                .register_if_absent(&payload.username, &hash, state.ledger_config.starting_balance)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to register employee");
                    AppError::Database(e.to_string())
                })?;

            match registration {
                Registration::Created(employee) => {
                    info!(
                        username = %employee.username,
                        balance = employee.balance,
                        "Employee registered"
                    );
                    return issue_token(&state, &employee.username);
                }
                // Lost a first-login race; the winner's password decides.
                Registration::Existing(employee) => employee.password_hash,
            }
        }
    };

    let verified = verify_password(&payload.password, &stored_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if !verified {
        info!(username = %payload.username, "Failed login attempt - invalid password");
        return Err(
            AppError::Conflict("authentication failed: invalid username or password".to_string())
                .into(),
        );
    }

    issue_token(&state, &payload.username)
}

fn issue_token(state: &AppState, username: &str) -> ApiResult<Json<AuthResponse>> {
    let token = state.jwt_service.generate_access_token(username).map_err(|e| {
        error!(error = %e, "Failed to generate access token");
        ApiError::from(AppError::Internal(e.to_string()))
    })?;
    Ok(Json(AuthResponse { token }))
}

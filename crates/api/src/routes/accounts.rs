//! Account routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tallybook_core::ledger::{Account, parse_account_id};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::{
    AppState,
    error::{ApiError, ErrorResponse},
};

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(create_account).get(find_account))
        .route("/accounts/{account_id}", get(get_account))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Document number, unique across accounts.
    #[schema(example = "12345678900")]
    pub document_number: Option<String>,
}

/// Query parameters for looking up an account.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountQuery {
    /// Account ID.
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
}

/// Response for an account.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Account ID.
    pub account_id: i64,
    /// Document number.
    pub document_number: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.id.into_inner(),
            document_number: account.document_number,
        }
    }
}

/// POST `/accounts` - Register an account.
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Missing document number or malformed body", body = ErrorResponse),
        (status = 409, description = "Document number already registered", body = ErrorResponse)
    )
)]
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let document_number = payload.document_number.unwrap_or_default();

    let account = state.accounts().create(&document_number).await?;
    info!(account_id = %account.id, "Account created");

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// GET `/accounts/{account_id}` - Fetch an account.
#[utoipa::path(
    get,
    path = "/accounts/{account_id}",
    tag = "accounts",
    params(("account_id" = i64, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 400, description = "Account ID is not a positive integer", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_account_id(Some(&raw_id))?;
    let account = state.accounts().get(id).await?;
    Ok(Json(account.into()))
}

/// GET `/accounts?accountId=` - Fetch an account by query parameter.
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "accounts",
    params(AccountQuery),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 400, description = "Account ID missing or not a positive integer", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse)
    )
)]
pub async fn find_account(
    State(state): State<AppState>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<AccountResponse>, ApiError> {
    let id = parse_account_id(query.account_id.as_deref())?;
    let account = state.accounts().get(id).await?;
    Ok(Json(account.into()))
}

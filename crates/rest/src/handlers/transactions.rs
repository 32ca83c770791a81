//! Property transaction history handler.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bblclub_search::SearchBackend;
use serde_json::json;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for a property's ACRIS transactions.
///
/// # HTTP Request
///
/// `GET [base]/api/properties/{bbl}/transactions`
///
/// # Response
///
/// - `200 OK` - `{ "transactions": [...] }`, newest first
/// - `400 Bad Request` - the identifier is not `borough-block-lot`
/// - `500 Internal Server Error` - the documents could not be fetched
pub async fn transactions_handler<B>(
    State(state): State<AppState<B>>,
    Path(bbl): Path<String>,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    debug!(bbl = %bbl, "Processing transaction history request");

    let transactions = state.joiner().fetch_transactions_with_parties(&bbl).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "transactions": transactions })),
    )
        .into_response())
}

//! Grid page handler.
//!
//! Translates a server-side row model request against one dataset, runs it
//! and answers with `{ rows, total }`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use bblclub_search::error::BackendError;
use bblclub_search::query::{GridPage, RowModelQueryBuilder, map_response};
use bblclub_search::schema::Dataset;
use bblclub_search::types::{Bbl, RowModelRequest};
use bblclub_search::{ClubError, SearchBackend};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Body of a grid page request.
#[derive(Debug, Default, Deserialize)]
pub struct GridQueryBody {
    /// The grid's row model request.
    #[serde(default)]
    pub request: Option<Value>,
    /// Borough of the property the page is scoped to.
    #[serde(default)]
    pub borough: Option<Value>,
    /// Block of the property the page is scoped to.
    #[serde(default)]
    pub block: Option<Value>,
    /// Lot of the property the page is scoped to.
    #[serde(default)]
    pub lot: Option<Value>,
}

/// Handler for grid pages.
///
/// # HTTP Request
///
/// `POST [base]/api/grid/{dataset}`
///
/// # Response
///
/// - `200 OK` - `{ "rows": [...], "total": n }`
/// - `400 Bad Request` - unknown dataset, missing or malformed `request`, or
///   missing property identifiers for a property-scoped dataset
/// - `500 Internal Server Error` - the search failed
pub async fn grid_handler<B>(
    State(state): State<AppState<B>>,
    Path(dataset): Path<String>,
    body: Result<Json<GridQueryBody>, JsonRejection>,
) -> RestResult<Response>
where
    B: SearchBackend + 'static,
{
    let dataset: Dataset = dataset.parse().map_err(RestError::bad_request)?;
    let Json(body) = body.map_err(|rejection| RestError::bad_request(rejection.body_text()))?;

    let request = match body.request.clone() {
        Some(Value::Null) | None => {
            return Err(RestError::bad_request("missing row model request"));
        }
        Some(request) => RowModelRequest::from_value(request)?,
    };

    let scope = property_scope(dataset, &body)?;

    debug!(
        dataset = %dataset,
        start_row = request.start_row(),
        end_row = request.end_row(),
        group_level = request.group_level(),
        scoped = scope.is_some(),
        "Processing grid request"
    );

    let mut builder = RowModelQueryBuilder::new(dataset.registry())
        .with_max_result_window(state.indexes().max_result_window);
    if let Some(bbl) = scope {
        for clause in bbl.scope_clauses() {
            builder = builder.with_scope(clause);
        }
    }
    let es_query = builder.build(&request);

    let index = state.indexes().index_for(dataset);
    let page = match state.backend().search(index, es_query.body.clone()).await {
        Ok(response) => map_response(&es_query, &response),
        Err(BackendError::IndexNotFound { index }) => {
            warn!(index = %index, dataset = %dataset, "Index not found; returning an empty page");
            GridPage::default()
        }
        Err(e) => return Err(ClubError::from(e).into()),
    };

    Ok(Json(page).into_response())
}

/// Resolves the property a page is scoped to.
///
/// Property-scoped datasets require all three identifiers. Other datasets
/// accept them optionally, all or none.
fn property_scope(dataset: Dataset, body: &GridQueryBody) -> RestResult<Option<Bbl>> {
    let parts = [&body.borough, &body.block, &body.lot];
    let given = parts.iter().filter(|part| is_present(part)).count();

    if given == 0 && !dataset.is_property_scoped() {
        return Ok(None);
    }
    if given < parts.len() {
        return Err(RestError::bad_request(format!(
            "dataset {} requires borough, block and lot",
            dataset
        )));
    }

    let segments = parts
        .iter()
        .map(|part| identifier_segment(part))
        .collect::<RestResult<Vec<String>>>()?;

    let bbl: Bbl = segments.join("-").parse()?;
    Ok(Some(bbl))
}

fn is_present(part: &Option<Value>) -> bool {
    match part {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Identifiers arrive as strings or numbers.
fn identifier_segment(part: &Option<Value>) -> RestResult<String> {
    match part {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) if n.is_u64() => Ok(n.to_string()),
        other => Err(RestError::bad_request(format!(
            "invalid property identifier: {}",
            other.as_ref().map(Value::to_string).unwrap_or_default()
        ))),
    }
}

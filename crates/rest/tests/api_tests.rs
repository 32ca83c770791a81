//! HTTP API tests.
//!
//! Tests the routes end to end against a stub backend:
//! - Grid pages (flat, grouped, scoped, missing index)
//! - Transaction histories
//! - Error bodies and status codes (400, 500, 503)

mod common;

use axum::http::StatusCode;
use bblclub_search::core::SearchResponse;
use serde_json::{Value, json};

use common::{StubBackend, create_test_server, document, party};

#[tokio::test]
async fn test_health_ok() {
    let (server, _) = create_test_server(StubBackend::new());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["backend"], json!("stub"));
}

#[tokio::test]
async fn test_health_unavailable() {
    let (server, _) = create_test_server(StubBackend::new().unhealthy());

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_liveness() {
    let (server, backend) = create_test_server(StubBackend::new().unhealthy());
    server.get("/_liveness").await.assert_status_ok();
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_grid_flat_page() {
    let (server, backend) = create_test_server(StubBackend::new().with_sources(
        "pluto",
        vec![
            json!({ "bbl": "1000130001", "address": "1 BROADWAY" }),
            json!({ "bbl": "1000130002", "address": "3 BROADWAY" }),
        ],
    ));

    let response = server
        .post("/api/grid/pluto")
        .json(&json!({
            "request": {
                "startRow": 0,
                "endRow": 100,
                "filterModel": {
                    "address": { "filterType": "text", "type": "contains", "filter": "broadway" }
                },
                "sortModel": [{ "colId": "bbl", "sort": "asc" }]
            }
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["rows"][1]["address"], json!("3 BROADWAY"));

    let sent = backend.last_body().unwrap();
    assert_eq!(sent["size"], json!(100));
    assert_eq!(sent["sort"], json!([{ "bbl": { "order": "asc" } }]));
}

#[tokio::test]
async fn test_grid_scoped_dataset() {
    let (server, backend) = create_test_server(StubBackend::new().with_sources(
        "acris-documents",
        vec![document("2019012300123001", "DEED", "2019-01-23")],
    ));

    let response = server
        .post("/api/grid/acris-documents")
        .json(&json!({
            "request": { "startRow": 0, "endRow": 50 },
            "borough": "3",
            "block": "00412",
            "lot": 7
        }))
        .await;

    response.assert_status_ok();
    let sent = backend.last_body().unwrap();
    assert_eq!(
        sent["query"]["bool"]["filter"],
        json!([
            { "term": { "borough": "3" } },
            { "term": { "block.integer": 412 } },
            { "term": { "lot.integer": 7 } }
        ])
    );
}

#[tokio::test]
async fn test_grid_grouped_page() {
    let (server, _) = create_test_server(StubBackend::new().with_response(
        "valuations",
        SearchResponse::default().with_aggregations(json!({
            "group_by_year": {
                "buckets": [
                    { "key": "2024", "doc_count": 1, "curmkttot": { "value": 1200000.0 } },
                    { "key": "2023", "doc_count": 1, "curmkttot": { "value": 1100000.0 } }
                ]
            },
            "group_count": { "value": 2 }
        })),
    ));

    let response = server
        .post("/api/grid/valuations")
        .json(&json!({
            "request": {
                "startRow": 0,
                "endRow": 100,
                "rowGroupCols": [{ "id": "year" }],
                "valueCols": [{ "id": "curmkttot", "aggFunc": "max" }],
                "sortModel": [{ "colId": "year", "sort": "desc" }]
            },
            "borough": 1,
            "block": 13,
            "lot": 1
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], json!(2));
    assert_eq!(
        body["rows"][0],
        json!({ "year": "2024", "childCount": 1, "curmkttot": 1200000.0 })
    );
}

#[tokio::test]
async fn test_grid_missing_index_is_empty_page() {
    let (server, _) = create_test_server(StubBackend::new());

    let response = server
        .post("/api/grid/acris-parties")
        .json(&json!({ "request": { "startRow": 0, "endRow": 100 } }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "rows": [], "total": 0 }));
}

#[tokio::test]
async fn test_grid_bad_requests() {
    let (server, backend) = create_test_server(StubBackend::new().with_sources("pluto", vec![]));

    let cases = [
        ("/api/grid/pluto", json!({})),
        ("/api/grid/pluto", json!({ "request": null })),
        ("/api/grid/pluto", json!({ "request": { "startRow": "zero" } })),
        ("/api/grid/buildings", json!({ "request": {} })),
        ("/api/grid/contacts", json!({ "request": {} })),
        (
            "/api/grid/valuations",
            json!({ "request": {}, "borough": "1", "block": "x", "lot": "1" }),
        ),
    ];

    for (path, body) in cases {
        let response = server.post(path).json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert!(error["error"].is_string(), "{} {}", path, body);
    }

    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_grid_backend_failure_is_generic() {
    let (server, _) = create_test_server(StubBackend::new().failing("pluto"));

    let response = server
        .post("/api/grid/pluto")
        .json(&json!({ "request": { "startRow": 0, "endRow": 100 } }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Internal server error"));
}

#[tokio::test]
async fn test_transactions() {
    let (server, _) = create_test_server(
        StubBackend::new()
            .with_sources(
                "acris-documents",
                vec![document("2019012300123001", "DEED", "2019-01-23")],
            )
            .with_sources(
                "acris-parties",
                vec![
                    party("2019012300123001", "1", "ESTATE OF R. JONES"),
                    party("2019012300123001", "2", "PARK SLOPE HOLDINGS LLC"),
                ],
            ),
    );

    let response = server.get("/api/properties/3-412-7/transactions").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let tx = &body["transactions"][0];
    assert_eq!(tx["fromParty"], json!(["ESTATE OF R. JONES"]));
    assert_eq!(tx["toParty"], json!(["PARK SLOPE HOLDINGS LLC"]));
    assert_eq!(tx["party1Type"], json!("GRANTOR"));
    assert_eq!(tx["isDeed"], json!(true));
}

#[tokio::test]
async fn test_transactions_invalid_identifier() {
    let (server, backend) = create_test_server(StubBackend::new());

    let response = server.get("/api/properties/3-412/transactions").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("3-412"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_transactions_document_failure() {
    let (server, _) = create_test_server(StubBackend::new().failing("acris-documents"));

    let response = server.get("/api/properties/3-412-7/transactions").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_transactions_party_failure_degrades() {
    let (server, _) = create_test_server(
        StubBackend::new()
            .with_sources(
                "acris-documents",
                vec![document("2019012300123001", "MTGE", "2019-01-23")],
            )
            .failing("acris-parties"),
    );

    let response = server.get("/api/properties/3-412-7/transactions").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["transactions"][0]["fromParty"], json!(["Unknown"]));
    assert_eq!(body["transactions"][0]["isMortgage"], json!(true));
}

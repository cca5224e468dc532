//! Importing-request transition counters only move for committed writes.
//! Kept in its own test binary so no other test touches the global counters.

mod common;

use axum::http::StatusCode;
use common::{id_of, TestApp};
use retail_store_api::metrics::IMPORTING_REQUEST_TRANSITIONS;
use serde_json::json;

fn transitions(status: &str) -> u64 {
    IMPORTING_REQUEST_TRANSITIONS
        .with_label_values(&[status])
        .get()
}

#[tokio::test]
async fn transitions_are_counted_after_commit_only() {
    let app = TestApp::new().await;
    let product_id = app.seed_product("Barley Tea").await;

    let mut ids = Vec::new();
    for quantity in [2, 3, 4] {
        let created = app
            .post(
                "/api/v1/importing-requests",
                &app.cashier,
                json!({ "productId": product_id, "quantity": quantity }),
            )
            .await;
        assert_eq!(created.status, StatusCode::OK, "{}", created.body);
        ids.push(id_of(created.data("importingRequest")));
    }

    let accepted_before = transitions("accepted");
    let cancelled_before = transitions("cancelled");

    let accepted = app
        .put(
            "/api/v1/importing-requests",
            &app.manager,
            json!({ "importingRequestIds": [ids[0], ids[1]] }),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK, "{}", accepted.body);
    assert_eq!(transitions("accepted"), accepted_before + 2);

    // ids[2] is pending but ids[0] is not: the whole batch rolls back.
    let rolled_back = app
        .put(
            "/api/v1/importing-requests",
            &app.manager,
            json!({ "importingRequestIds": [ids[2], ids[0]] }),
        )
        .await;
    assert_eq!(rolled_back.status, StatusCode::BAD_REQUEST);
    assert_eq!(transitions("accepted"), accepted_before + 2);

    let cancelled = app
        .delete(&format!("/api/v1/importing-requests/{}", ids[2]), &app.manager)
        .await;
    assert_eq!(cancelled.status, StatusCode::OK, "{}", cancelled.body);
    assert_eq!(transitions("cancelled"), cancelled_before + 1);

    let rejected_cancel = app
        .delete(&format!("/api/v1/importing-requests/{}", ids[2]), &app.manager)
        .await;
    assert_eq!(rejected_cancel.status, StatusCode::BAD_REQUEST);
    assert_eq!(transitions("cancelled"), cancelled_before + 1);
}

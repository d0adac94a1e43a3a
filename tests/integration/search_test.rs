//! Name-search integration tests.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, unique_email};

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_search_matches_folders_and_files_case_insensitively() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    app.request(
        "POST",
        "/api/folders",
        Some(json!({ "name": "Quarterly Reports" })),
        Some(&session.token),
    )
    .await;
    app.upload(
        &session.token,
        "annual-report.txt",
        "text/plain",
        b"numbers",
        None,
    )
    .await;
    app.upload(&session.token, "photo.png", "image/png", b"pixels", None)
        .await;

    let response = app
        .request("GET", "/api/search?q=REPORT", None, Some(&session.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["folders"].as_array().map(Vec::len),
        Some(1)
    );
    let files = response.body["data"]["files"]
        .as_array()
        .expect("Files is not an array");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], json!("annual-report.txt"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_search_skips_root_and_trashed_items() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    // The root folder is called "My Drive" but never shows up in results.
    let for_root = app
        .request("GET", "/api/search?q=Drive", None, Some(&session.token))
        .await;
    assert_eq!(for_root.body["data"]["folders"], json!([]));

    let uploaded = app
        .upload(&session.token, "findme.txt", "text/plain", b"x", None)
        .await;
    let file_id = uploaded.body["data"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("No file id");
    app.request(
        "DELETE",
        &format!("/api/files/{file_id}"),
        None,
        Some(&session.token),
    )
    .await;

    let for_trashed = app
        .request("GET", "/api/search?q=findme", None, Some(&session.token))
        .await;
    assert_eq!(for_trashed.body["data"]["files"], json!([]));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_search_caps_results_per_kind() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    for i in 0..12 {
        let response = app
            .request(
                "POST",
                "/api/folders",
                Some(json!({ "name": format!("zebra-{i:02}") })),
                Some(&session.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request("GET", "/api/search?q=zebra", None, Some(&session.token))
        .await;

    assert_eq!(
        response.body["data"]["folders"].as_array().map(Vec::len),
        Some(10)
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_blank_query_is_rejected() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let response = app
        .request("GET", "/api/search?q=%20%20", None, Some(&session.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_search_is_scoped_to_the_caller() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    app.upload(&alice.token, "private.txt", "text/plain", b"mine", None)
        .await;

    let response = app
        .request("GET", "/api/search?q=private", None, Some(&bob.token))
        .await;

    assert_eq!(response.body["data"]["files"], json!([]));
}

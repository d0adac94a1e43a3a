//! Trash lifecycle integration tests.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, TestResponse, unique_email};

fn data_id(response: &TestResponse) -> Uuid {
    response.body["data"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("No id in response")
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_trash_lists_trashed_files_and_folders() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let uploaded = app
        .upload(&session.token, "old.txt", "text/plain", b"old", None)
        .await;
    let file_id = data_id(&uploaded);
    app.request(
        "DELETE",
        &format!("/api/files/{file_id}"),
        None,
        Some(&session.token),
    )
    .await;

    let folder = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Stale" })),
            Some(&session.token),
        )
        .await;
    let folder_id = data_id(&folder);
    app.request(
        "DELETE",
        &format!("/api/folders/{folder_id}"),
        None,
        Some(&session.token),
    )
    .await;

    let trash = app
        .request("GET", "/api/trash", None, Some(&session.token))
        .await;
    assert_eq!(trash.status, StatusCode::OK);
    assert_eq!(trash.body["data"]["files"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        trash.body["data"]["folders"].as_array().map(Vec::len),
        Some(1)
    );
    assert_eq!(trash.body["data"]["files"][0]["name"], json!("old.txt"));
    assert_eq!(trash.body["data"]["folders"][0]["name"], json!("Stale"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_restore_file_from_trash() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let uploaded = app
        .upload(&session.token, "keep.txt", "text/plain", b"keep", None)
        .await;
    let file_id = data_id(&uploaded);
    app.request(
        "DELETE",
        &format!("/api/files/{file_id}"),
        None,
        Some(&session.token),
    )
    .await;

    let restored = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}"),
            Some(json!({ "operation": "restore" })),
            Some(&session.token),
        )
        .await;
    assert_eq!(restored.status, StatusCode::OK);
    assert_eq!(restored.body["data"]["is_trash"], json!(false));

    let trash = app
        .request("GET", "/api/trash", None, Some(&session.token))
        .await;
    assert_eq!(trash.body["data"]["files"], json!([]));

    let listing = app
        .request("GET", "/api/files", None, Some(&session.token))
        .await;
    assert_eq!(listing.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_empty_trash_purges_subtrees_shares_and_storage() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    // A loose file in the trash, shared with someone.
    let loose = app
        .upload(&session.token, "loose.txt", "text/plain", &[0u8; 1024], None)
        .await;
    let loose_id = data_id(&loose);
    let share = app
        .request(
            "POST",
            "/api/share",
            Some(json!({
                "item_type": "file",
                "item_id": loose_id,
                "email": unique_email("bob"),
            })),
            Some(&session.token),
        )
        .await;
    assert_eq!(share.status, StatusCode::CREATED);
    app.request(
        "DELETE",
        &format!("/api/files/{loose_id}"),
        None,
        Some(&session.token),
    )
    .await;

    // A trashed folder with a nested file.
    let folder = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Old stuff" })),
            Some(&session.token),
        )
        .await;
    let folder_id = data_id(&folder);
    let nested = app
        .upload(
            &session.token,
            "nested.txt",
            "text/plain",
            &[0u8; 2048],
            Some(folder_id),
        )
        .await;
    let nested_id = data_id(&nested);
    app.request(
        "DELETE",
        &format!("/api/folders/{folder_id}"),
        None,
        Some(&session.token),
    )
    .await;

    // A survivor that must not be touched.
    let survivor = app
        .upload(
            &session.token,
            "survivor.txt",
            "text/plain",
            &[0u8; 512],
            None,
        )
        .await;
    let survivor_id = data_id(&survivor);

    let emptied = app
        .request("DELETE", "/api/trash/empty", None, Some(&session.token))
        .await;
    assert_eq!(emptied.status, StatusCode::OK);
    // The loose file and the nested one, with their bytes.
    assert_eq!(emptied.body["data"]["deleted_files"], json!(2));
    assert_eq!(emptied.body["data"]["freed_storage"], json!(3072));

    let trash = app
        .request("GET", "/api/trash", None, Some(&session.token))
        .await;
    assert_eq!(trash.body["data"]["files"], json!([]));
    assert_eq!(trash.body["data"]["folders"], json!([]));

    // Purged rows are gone, including the file nested in the folder.
    for id in [loose_id, nested_id] {
        let gone = app
            .request(
                "GET",
                &format!("/api/files/{id}"),
                None,
                Some(&session.token),
            )
            .await;
        assert_eq!(gone.status, StatusCode::NOT_FOUND);
    }

    // Shares of purged items went with them.
    let shares = app
        .request("GET", "/api/share", None, Some(&session.token))
        .await;
    assert_eq!(shares.body["data"], json!([]));

    // Only the survivor still counts against the quota.
    let usage = app
        .request("GET", "/api/users/storage", None, Some(&session.token))
        .await;
    assert_eq!(usage.body["data"]["used_storage"], json!(512));

    let alive = app
        .request(
            "GET",
            &format!("/api/files/{survivor_id}"),
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(alive.status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_empty_trash_on_empty_trash_is_a_noop() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let response = app
        .request("DELETE", "/api/trash/empty", None, Some(&session.token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["deleted_files"], json!(0));
    assert_eq!(response.body["data"]["freed_storage"], json!(0));
}

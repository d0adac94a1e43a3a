//! Folder tree integration tests.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, TestResponse, unique_email};

async fn create_folder(
    app: &TestApp,
    token: &str,
    name: &str,
    parent_id: Option<Uuid>,
) -> TestResponse {
    app.request(
        "POST",
        "/api/folders",
        Some(json!({ "name": name, "parent_id": parent_id })),
        Some(token),
    )
    .await
}

fn folder_id(response: &TestResponse) -> Uuid {
    response.body["data"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("No folder id in response")
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_create_and_list_folders() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let created = create_folder(&app, &session.token, "Documents", None).await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);
    assert_eq!(created.body["data"]["name"], json!("Documents"));
    assert_eq!(created.body["data"]["is_root"], json!(false));

    let listing = app
        .request("GET", "/api/folders", None, Some(&session.token))
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    let names: Vec<&str> = listing.body["data"]
        .as_array()
        .expect("Listing is not an array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Documents"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_duplicate_name_in_same_parent_conflicts() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    create_folder(&app, &session.token, "Documents", None).await;
    let duplicate = create_folder(&app, &session.token, "Documents", None).await;

    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_same_name_in_different_parents_is_fine() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let parent = create_folder(&app, &session.token, "Projects", None).await;
    create_folder(&app, &session.token, "Archive", None).await;
    let nested = create_folder(&app, &session.token, "Archive", Some(folder_id(&parent))).await;

    assert_eq!(nested.status, StatusCode::OK, "{:?}", nested.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_root_folder_cannot_be_renamed_moved_or_deleted() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;
    let root_id = app.root_folder_id(session.user_id).await;
    let other = create_folder(&app, &session.token, "Other", None).await;

    let rename = app
        .request(
            "PATCH",
            &format!("/api/folders/{root_id}"),
            Some(json!({ "name": "Renamed" })),
            Some(&session.token),
        )
        .await;
    assert_eq!(rename.status, StatusCode::FORBIDDEN);

    let mv = app
        .request(
            "PATCH",
            &format!("/api/folders/{root_id}"),
            Some(json!({ "parent_id": folder_id(&other) })),
            Some(&session.token),
        )
        .await;
    assert_eq!(mv.status, StatusCode::FORBIDDEN);

    let del = app
        .request(
            "DELETE",
            &format!("/api/folders/{root_id}"),
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(del.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_cannot_become_its_own_parent() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;
    let folder = create_folder(&app, &session.token, "Loop", None).await;
    let id = folder_id(&folder);

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{id}"),
            Some(json!({ "parent_id": id })),
            Some(&session.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_cannot_move_into_own_subtree() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let a = create_folder(&app, &session.token, "A", None).await;
    let b = create_folder(&app, &session.token, "B", Some(folder_id(&a))).await;
    let c = create_folder(&app, &session.token, "C", Some(folder_id(&b))).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{}", folder_id(&a)),
            Some(json!({ "parent_id": folder_id(&c) })),
            Some(&session.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_move_folder_to_new_parent() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let src = create_folder(&app, &session.token, "Source", None).await;
    let dst = create_folder(&app, &session.token, "Destination", None).await;

    let moved = app
        .request(
            "PATCH",
            &format!("/api/folders/{}", folder_id(&src)),
            Some(json!({ "parent_id": folder_id(&dst) })),
            Some(&session.token),
        )
        .await;

    assert_eq!(moved.status, StatusCode::OK, "{:?}", moved.body);
    assert_eq!(
        moved.body["data"]["parent_id"],
        json!(folder_id(&dst).to_string())
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_star_and_filter_starred_folders() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    create_folder(&app, &session.token, "Plain", None).await;
    let starred = create_folder(&app, &session.token, "Favorites", None).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{}", folder_id(&starred)),
            Some(json!({ "operation": "star" })),
            Some(&session.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_starred"], json!(true));

    let listing = app
        .request("GET", "/api/folders?starred=true", None, Some(&session.token))
        .await;
    let names: Vec<&str> = listing.body["data"]
        .as_array()
        .expect("Listing is not an array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Favorites"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_delete_trashes_then_permanent_purges() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;
    let folder = create_folder(&app, &session.token, "Doomed", None).await;
    let id = folder_id(&folder);

    let first = app
        .request(
            "DELETE",
            &format!("/api/folders/{id}"),
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["permanent"], json!(false));

    // Trashed folders disappear from the normal listing but still exist.
    let listing = app
        .request("GET", "/api/folders", None, Some(&session.token))
        .await;
    assert_eq!(listing.body["data"], json!([]));
    let trashed = app
        .request(
            "GET",
            "/api/folders?is_trash=true",
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(trashed.body["data"][0]["name"], json!("Doomed"));

    let second = app
        .request(
            "DELETE",
            &format!("/api/folders/{id}?permanent=true"),
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["data"]["permanent"], json!(true));

    let gone = app
        .request(
            "GET",
            &format!("/api/folders/{id}"),
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_permanent_delete_skips_the_trash() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;
    let folder = create_folder(&app, &session.token, "Straight", None).await;
    let id = folder_id(&folder);

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{id}?permanent=true"),
            None,
            Some(&session.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["permanent"], json!(true));

    let trash = app.request("GET", "/api/trash", None, Some(&session.token)).await;
    assert_eq!(trash.body["data"]["folders"], json!([]));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_put_renames_and_stars_in_one_call() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;
    let folder = create_folder(&app, &session.token, "Drafts", None).await;
    let id = folder_id(&folder);

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{id}"),
            Some(json!({ "name": "Notes", "is_starred": true })),
            Some(&session.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["name"], json!("Notes"));
    assert_eq!(response.body["data"]["is_starred"], json!(true));

    let empty = app
        .request(
            "PUT",
            &format!("/api/folders/{id}"),
            Some(json!({})),
            Some(&session.token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_restore_brings_folder_back() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;
    let folder = create_folder(&app, &session.token, "Phoenix", None).await;
    let id = folder_id(&folder);

    app.request(
        "DELETE",
        &format!("/api/folders/{id}"),
        None,
        Some(&session.token),
    )
    .await;

    let restored = app
        .request(
            "PATCH",
            &format!("/api/folders/{id}"),
            Some(json!({ "operation": "restore" })),
            Some(&session.token),
        )
        .await;
    assert_eq!(restored.status, StatusCode::OK);
    assert_eq!(restored.body["data"]["is_trash"], json!(false));

    let listing = app
        .request("GET", "/api/folders", None, Some(&session.token))
        .await;
    let names: Vec<&str> = listing.body["data"]
        .as_array()
        .expect("Listing is not an array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Phoenix"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_breadcrumbs_run_root_first() {
    let app = TestApp::new().await;
    let session = app.register("Alice", &unique_email("alice")).await;

    let a = create_folder(&app, &session.token, "A", None).await;
    let b = create_folder(&app, &session.token, "B", Some(folder_id(&a))).await;
    let c = create_folder(&app, &session.token, "C", Some(folder_id(&b))).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{}/breadcrumbs", folder_id(&c)),
            None,
            Some(&session.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["data"]
        .as_array()
        .expect("Breadcrumbs are not an array")
        .iter()
        .filter_map(|f| f["name"].as_str())
        .collect();
    // The root folder is not part of the trail.
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_foreign_folder_reads_as_not_found() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let folder = create_folder(&app, &alice.token, "Private", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{}", folder_id(&folder)),
            None,
            Some(&bob.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

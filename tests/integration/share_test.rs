//! Sharing and access-resolution integration tests.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{AuthSession, TestApp, TestResponse, unique_email};

fn data_id(response: &TestResponse) -> Uuid {
    response.body["data"]["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("No id in response")
}

fn share_token(response: &TestResponse) -> String {
    response.body["data"]["token"]
        .as_str()
        .expect("No token in share response")
        .to_string()
}

async fn upload_file(app: &TestApp, session: &AuthSession, name: &str) -> Uuid {
    let response = app
        .upload(&session.token, name, "text/plain", b"contents", None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    data_id(&response)
}

async fn share_file(
    app: &TestApp,
    owner: &AuthSession,
    file_id: Uuid,
    recipient_email: &str,
) -> TestResponse {
    app.request(
        "POST",
        "/api/share",
        Some(json!({
            "item_type": "file",
            "item_id": file_id,
            "email": recipient_email,
        })),
        Some(&owner.token),
    )
    .await
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_share_accept_grants_file_access() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let share = share_file(&app, &alice, file_id, &bob.email).await;
    assert_eq!(share.status, StatusCode::CREATED, "{:?}", share.body);
    assert_eq!(share.body["data"]["accepted"], json!(false));
    let token = share_token(&share);

    // Pending invitations grant nothing.
    let before = app
        .request(
            "GET",
            &format!("/api/files/{file_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(before.status, StatusCode::NOT_FOUND);

    // The invitation preview carries the item name.
    let preview = app
        .request(
            "GET",
            &format!("/api/share/invitation/{token}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(preview.status, StatusCode::OK);
    assert_eq!(preview.body["data"]["item_name"], json!("report.txt"));

    let accepted = app
        .request(
            "POST",
            &format!("/api/share/invitation/{token}/accept"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(accepted.status, StatusCode::OK, "{:?}", accepted.body);
    assert_eq!(accepted.body["data"]["accepted"], json!(true));
    // Redeeming consumes the token.
    assert_eq!(accepted.body["data"]["token"], json!(null));

    let after = app
        .request(
            "GET",
            &format!("/api/files/{file_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(after.status, StatusCode::OK);
    assert_eq!(after.body["data"]["name"], json!("report.txt"));

    let received = app
        .request("GET", "/api/share/user", None, Some(&bob.token))
        .await;
    assert_eq!(received.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_accept_with_wrong_email_is_forbidden() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;
    let carol = app.register("Carol", &unique_email("carol")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let share = share_file(&app, &alice, file_id, &bob.email).await;
    let token = share_token(&share);

    let response = app
        .request(
            "POST",
            &format!("/api/share/invitation/{token}/accept"),
            None,
            Some(&carol.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_expired_invitation_is_gone_for_everyone() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;
    let carol = app.register("Carol", &unique_email("carol")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let share = share_file(&app, &alice, file_id, &bob.email).await;
    let token = share_token(&share);
    app.expire_share(data_id(&share)).await;

    let preview = app
        .request(
            "GET",
            &format!("/api/share/invitation/{token}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(preview.status, StatusCode::GONE);

    let accept = app
        .request(
            "POST",
            &format!("/api/share/invitation/{token}/accept"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(accept.status, StatusCode::GONE);

    // Expiry wins over the email mismatch: 410, not 403.
    let wrong_user = app
        .request(
            "POST",
            &format!("/api/share/invitation/{token}/accept"),
            None,
            Some(&carol.token),
        )
        .await;
    assert_eq!(wrong_user.status, StatusCode::GONE);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_duplicate_share_conflicts() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    share_file(&app, &alice, file_id, &bob.email).await;
    let duplicate = share_file(&app, &alice, file_id, &bob.email).await;

    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_self_share_and_root_share_are_rejected() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let self_share = share_file(&app, &alice, file_id, &alice.email).await;
    assert_eq!(self_share.status, StatusCode::BAD_REQUEST);

    let root_id = app.root_folder_id(alice.user_id).await;
    let root_share = app
        .request(
            "POST",
            "/api/share",
            Some(json!({
                "item_type": "folder",
                "item_id": root_id,
                "email": unique_email("bob"),
            })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(root_share.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_only_owner_can_share_an_item() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let response = share_file(&app, &bob, file_id, &unique_email("carol")).await;

    // Foreign items read as missing, never as forbidden.
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_share_does_not_reach_contained_files() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let folder = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Shared" })),
            Some(&alice.token),
        )
        .await;
    let folder_id = data_id(&folder);

    let uploaded = app
        .upload(
            &alice.token,
            "inside.txt",
            "text/plain",
            b"contents",
            Some(folder_id),
        )
        .await;
    let file_id = data_id(&uploaded);

    let share = app
        .request(
            "POST",
            "/api/share",
            Some(json!({
                "item_type": "folder",
                "item_id": folder_id,
                "email": bob.email,
            })),
            Some(&alice.token),
        )
        .await;
    let token = share_token(&share);
    app.request(
        "POST",
        &format!("/api/share/invitation/{token}/accept"),
        None,
        Some(&bob.token),
    )
    .await;

    // The shared folder itself opens.
    let folder_view = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(folder_view.status, StatusCode::OK);

    // But the file inside it does not: shares never recurse.
    let file_view = app
        .request(
            "GET",
            &format!("/api/files/{file_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(file_view.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_revoke_removes_access() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;
    let carol = app.register("Carol", &unique_email("carol")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let share = share_file(&app, &alice, file_id, &bob.email).await;
    let share_id = data_id(&share);
    let token = share_token(&share);

    app.request(
        "POST",
        &format!("/api/share/invitation/{token}/accept"),
        None,
        Some(&bob.token),
    )
    .await;

    // A bystander cannot revoke someone else's share.
    let denied = app
        .request(
            "DELETE",
            &format!("/api/share/{share_id}"),
            None,
            Some(&carol.token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    // The recipient can walk away from a share.
    let revoked = app
        .request(
            "DELETE",
            &format!("/api/share/{share_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(revoked.status, StatusCode::OK);

    let after = app
        .request(
            "GET",
            &format!("/api/files/{file_id}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(after.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_get_share_is_visible_to_both_sides_only() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;
    let carol = app.register("Carol", &unique_email("carol")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let share = share_file(&app, &alice, file_id, &bob.email).await;
    let share_id = data_id(&share);

    for session in [&alice, &bob] {
        let response = app
            .request(
                "GET",
                &format!("/api/share/{share_id}"),
                None,
                Some(&session.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.body["data"]["item_name"], json!("report.txt"));
    }

    let hidden = app
        .request(
            "GET",
            &format!("/api/share/{share_id}"),
            None,
            Some(&carol.token),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_only_the_sharer_can_change_permission() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let file_id = upload_file(&app, &alice, "report.txt").await;
    let share = share_file(&app, &alice, file_id, &bob.email).await;
    let share_id = data_id(&share);
    assert_eq!(share.body["data"]["permission"], json!("view"));

    let denied = app
        .request(
            "PUT",
            &format!("/api/share/{share_id}"),
            Some(json!({ "permission": "edit" })),
            Some(&bob.token),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let updated = app
        .request(
            "PUT",
            &format!("/api/share/{share_id}"),
            Some(json!({ "permission": "edit" })),
            Some(&alice.token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{:?}", updated.body);
    assert_eq!(updated.body["data"]["permission"], json!("edit"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_shares_scoped_to_one_item() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let first = upload_file(&app, &alice, "one.txt").await;
    let second = upload_file(&app, &alice, "two.txt").await;
    share_file(&app, &alice, first, &unique_email("dave")).await;
    share_file(&app, &alice, first, &unique_email("erin")).await;
    share_file(&app, &alice, second, &unique_email("frank")).await;

    let scoped = app
        .request(
            "GET",
            &format!("/api/share?file_id={first}"),
            None,
            Some(&alice.token),
        )
        .await;
    assert_eq!(scoped.status, StatusCode::OK);
    assert_eq!(scoped.body["data"].as_array().map(Vec::len), Some(2));

    // Items the caller neither owns nor holds a share of read as missing.
    let foreign = app
        .request(
            "GET",
            &format!("/api/share?file_id={first}"),
            None,
            Some(&bob.token),
        )
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_list_created_shows_pending_and_accepted() {
    let app = TestApp::new().await;
    let alice = app.register("Alice", &unique_email("alice")).await;
    let bob = app.register("Bob", &unique_email("bob")).await;

    let first = upload_file(&app, &alice, "one.txt").await;
    let second = upload_file(&app, &alice, "two.txt").await;

    let pending = share_file(&app, &alice, first, &unique_email("dave")).await;
    assert_eq!(pending.status, StatusCode::CREATED);

    let to_accept = share_file(&app, &alice, second, &bob.email).await;
    let token = share_token(&to_accept);
    app.request(
        "POST",
        &format!("/api/share/invitation/{token}/accept"),
        None,
        Some(&bob.token),
    )
    .await;

    let created = app
        .request("GET", "/api/share", None, Some(&alice.token))
        .await;
    assert_eq!(created.body["data"].as_array().map(Vec::len), Some(2));

    // Only accepted shares show up on the receiving side.
    let received = app
        .request("GET", "/api/share/user", None, Some(&bob.token))
        .await;
    let received = received.body["data"].as_array().expect("Not an array");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["item_name"], json!("two.txt"));
}

//! Integration tests for the access page and gated downloads.

mod helpers;

use chrono::{Duration, Utc};
use http::StatusCode;

#[tokio::test]
async fn test_unknown_share_is_not_found() {
    let app = helpers::TestApp::new();
    let id = dropshare_core::types::ShareId::generate();

    let response = app.request("GET", &format!("/api/shares/{id}"), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.data()["state"], "not_found");
    assert_eq!(
        response.data()["message"],
        "File not found. The link may be incorrect or the file has been deleted."
    );
}

#[tokio::test]
async fn test_malformed_link_is_invalid() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/file/not-a-uuid", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.data()["message"], "Invalid file link.");
}

#[tokio::test]
async fn test_expired_share_hides_details() {
    let app = helpers::TestApp::new();
    let id = app
        .seed_share(
            "old.zip",
            b"archive",
            Some("abc"),
            Utc::now() - Duration::hours(1),
        )
        .await;

    let page = app.request("GET", &format!("/api/shares/{id}"), None).await;
    assert_eq!(page.status, StatusCode::GONE);
    assert_eq!(page.data()["state"], "expired");
    assert!(page.data().get("name").is_none());
    assert_eq!(page.data()["files"].as_array().unwrap().len(), 0);

    let unlock = app
        .request(
            "POST",
            &format!("/api/shares/{id}/unlock"),
            Some(serde_json::json!({ "password": "abc" })),
        )
        .await;
    assert_eq!(unlock.status, StatusCode::GONE);

    let file = app
        .download(&format!("/api/shares/{id}/files/0"), Some("abc"))
        .await;
    assert_eq!(file.status, StatusCode::GONE);
    assert_eq!(
        file.body["message"],
        "This file sharing link has expired and is no longer available."
    );
}

#[tokio::test]
async fn test_public_share_shows_remaining_time() {
    let app = helpers::TestApp::new();
    let id = app
        .seed_share(
            "notes.txt",
            b"hello",
            None,
            Utc::now() + Duration::days(2) + Duration::hours(3) + Duration::minutes(30),
        )
        .await;

    let page = app.request("GET", &format!("/file/{id}"), None).await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.data()["state"], "granted");
    let notice = page.data()["expiry_notice"].as_str().unwrap();
    assert!(notice.contains("2 days"), "unexpected notice: {notice}");
    assert!(notice.contains("3 hours"), "unexpected notice: {notice}");

    let file = app
        .download(&format!("/api/shares/{id}/files/0"), None)
        .await;
    assert_eq!(file.status, StatusCode::OK);
    assert_eq!(&file.raw[..], b"hello");
}

#[tokio::test]
async fn test_empty_password_is_a_validation_error() {
    let app = helpers::TestApp::new();
    let id = app
        .seed_share("a.txt", b"a", Some("abc"), Utc::now() + Duration::days(1))
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/shares/{id}/unlock"),
            Some(serde_json::json!({ "password": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_file_index_is_not_found() {
    let app = helpers::TestApp::new();
    let id = app
        .seed_share("a.txt", b"a", None, Utc::now() + Duration::days(1))
        .await;

    let response = app
        .download(&format!("/api/shares/{id}/files/3"), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["storage"]["provider"], "memory");
}

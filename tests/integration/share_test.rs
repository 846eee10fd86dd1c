//! Integration tests for the upload form and link generation.

mod helpers;

use http::StatusCode;

use dropshare_core::config::AppConfig;

#[tokio::test]
async fn test_upload_options() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/upload/options", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    let days: Vec<u64> = data["expiry_choices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["days"].as_u64().unwrap())
        .collect();
    assert_eq!(days, vec![1, 3, 7]);
    assert_eq!(data["expiry_choices"][0]["label"], "1 Day");
    assert_eq!(data["default_expiry_days"], 3);
    assert_eq!(data["max_file_size_label"], "50.00 MB");
}

#[tokio::test]
async fn test_create_single_file_share() {
    let app = helpers::TestApp::new();

    let response = app
        .upload(&[("report.pdf", "%PDF-1.7 report")], None, Some(7))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let link = response.data();
    let id = link["id"].as_str().unwrap();
    assert_eq!(
        link["url"],
        format!("http://localhost:8080/file/{id}").as_str()
    );
    assert_eq!(link["name"], "report.pdf");
    assert_eq!(link["file_count"], 1);
    assert_eq!(link["is_password_protected"], false);
    assert_eq!(link["expiry_choice"], 7);
    assert_eq!(app.storage.len().await, 1);

    let page = app.request("GET", &format!("/file/{id}"), None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.data()["state"], "granted");
    assert_eq!(page.data()["name"], "report.pdf");
    assert_eq!(page.data()["files"][0]["name"], "report.pdf");
    assert_eq!(page.data()["multi_select"], false);
}

#[tokio::test]
async fn test_protected_multi_file_share_round_trip() {
    let app = helpers::TestApp::new();

    let response = app
        .upload(
            &[("a.txt", "alpha"), ("b.txt", "bravo")],
            Some("abc"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["name"], "2 files");
    assert_eq!(response.data()["is_password_protected"], true);
    assert_eq!(response.data()["expiry_choice"], 3);
    let id = response.data()["id"].as_str().unwrap().to_string();

    let page = app.request("GET", &format!("/api/shares/{id}"), None).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.data()["state"], "password_required");
    assert!(page.data().get("name").is_none());
    assert_eq!(page.data()["files"].as_array().unwrap().len(), 0);

    let wrong = app
        .request(
            "POST",
            &format!("/api/shares/{id}/unlock"),
            Some(serde_json::json!({ "password": "xyz" })),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.data()["error"], "Incorrect password. Please try again.");

    let granted = app
        .request(
            "POST",
            &format!("/api/shares/{id}/unlock"),
            Some(serde_json::json!({ "password": "abc" })),
        )
        .await;
    assert_eq!(granted.status, StatusCode::OK);
    assert_eq!(granted.data()["state"], "granted");
    assert_eq!(granted.data()["multi_select"], true);
    let files = granted.data()["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1]["name"], "b.txt");

    let path = files[1]["download_path"].as_str().unwrap();
    let file = app.download(path, Some("abc")).await;
    assert_eq!(file.status, StatusCode::OK);
    assert_eq!(&file.raw[..], b"bravo");
    let disposition = file.headers["content-disposition"].to_str().unwrap();
    assert!(disposition.contains("filename=\"b.txt\""));

    let denied = app.download(path, None).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let wrong_password = app.download(path, Some("nope")).await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_empty_upload_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app.upload(&[], Some("abc"), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_unsupported_expiry_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app.upload(&[("a.txt", "alpha")], None, Some(5)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.storage.is_empty().await);
}

#[tokio::test]
async fn test_oversized_file_is_rejected_before_upload() {
    let mut config = AppConfig::default();
    config.storage.max_upload_size_bytes = 64;
    let app = helpers::TestApp::with_config(config);

    let big = "x".repeat(100);
    let response = app
        .upload(&[("ok.txt", "tiny"), ("big.bin", big.as_str())], None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("big.bin")
    );
    assert!(app.storage.is_empty().await);
}

#[tokio::test]
async fn test_required_password_is_enforced() {
    let mut config = AppConfig::default();
    config.share.require_password = true;
    let app = helpers::TestApp::with_config(config);

    let response = app.upload(&[("a.txt", "alpha")], None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.upload(&[("a.txt", "alpha")], Some("pw"), None).await;
    assert_eq!(response.status, StatusCode::CREATED);
}

//! API endpoint tests
//!
//! Drive the full router (middleware included) through `oneshot` against the
//! in-memory object store.


use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use test_fixtures::*;

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = TestApp::new();

    let response = app
        .send(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await["status"], "healthy");

    let response = app
        .send(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/upload_certificate_view"].is_object());
}

#[tokio::test]
async fn listing_an_empty_folder_returns_message() {
    let app = TestApp::new();

    let response = app
        .send(list_request(
            "name=alice&certificate_type=passport&document_name=scan1",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": "No files found." }));
}

#[tokio::test]
async fn listing_requires_name_and_certificate_type() {
    let app = TestApp::new();

    for query in ["certificate_type=passport", "name=alice", "name=&certificate_type=x", ""] {
        let response = app.send(list_request(query)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query {query:?}");
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Missing required fields: name or certificate_type." })
        );
    }
}

#[tokio::test]
async fn upload_creates_marker_then_object() {
    let app = TestApp::new();

    let body = multipart_body(
        &[
            ("name", "bob"),
            ("certificate_type", "visa"),
            ("document_name", "doc1"),
        ],
        Some(("photo.pdf", b"%PDF-1.7 test".as_slice())),
    );
    let response = app.send(upload_request(body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "message": "File uploaded successfully",
            "file_key": "bob/visa/doc1/photo.pdf"
        })
    );
    assert_eq!(
        app.storage.keys(),
        vec!["bob/visa/doc1/".to_string(), "bob/visa/doc1/photo.pdf".to_string()]
    );
    assert_eq!(
        app.storage.object("bob/visa/doc1/").unwrap().len(),
        0,
        "folder marker is empty"
    );
    assert_eq!(
        app.storage.object("bob/visa/doc1/photo.pdf").unwrap().as_ref(),
        b"%PDF-1.7 test"
    );
}

#[tokio::test]
async fn uploaded_files_are_listed() {
    let app = TestApp::new();

    let body = multipart_body(
        &[
            ("name", "bob"),
            ("certificate_type", "visa"),
            ("document_name", "doc1"),
        ],
        Some(("photo.pdf", b"12345".as_slice())),
    );
    assert_eq!(app.send(upload_request(body)).await.status(), StatusCode::OK);

    let response = app
        .send(list_request("name=bob&certificate_type=visa&document_name=doc1"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let files = body["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["file_key"], "bob/visa/doc1/");
    assert_eq!(files[0]["file_name"], "");
    assert_eq!(files[1]["file_key"], "bob/visa/doc1/photo.pdf");
    assert_eq!(files[1]["file_name"], "photo.pdf");
    assert_eq!(files[1]["size"], 5);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn second_upload_reuses_existing_folder() {
    let app = TestApp::new();
    let fields = [
        ("name", "bob"),
        ("certificate_type", "visa"),
        ("document_name", "doc1"),
    ];

    for file in ["a.pdf", "b.pdf"] {
        let response = app
            .send(upload_request(multipart_body(&fields, Some((file, b"x".as_slice())))))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(app.storage.len(), 3);
}

#[tokio::test]
async fn upload_without_file_is_rejected_before_storage() {
    let app = TestApp::new();

    let body = multipart_body(
        &[
            ("name", "bob"),
            ("certificate_type", "visa"),
            ("document_name", "doc1"),
        ],
        None,
    );
    let response = app.send(upload_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"]
        .as_str()
        .unwrap()
        .starts_with("Missing required fields"));
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn upload_without_document_name_is_rejected() {
    let app = TestApp::new();

    let body = multipart_body(
        &[("name", "bob"), ("certificate_type", "visa")],
        Some(("photo.pdf", b"x".as_slice())),
    );
    let response = app.send(upload_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn upload_with_non_multipart_body_is_bad_request() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/upload_certificate_view")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_rejects_traversal_segments() {
    let app = TestApp::new();

    let body = multipart_body(
        &[
            ("name", ".."),
            ("certificate_type", "visa"),
            ("document_name", "doc1"),
        ],
        Some(("photo.pdf", b"x".as_slice())),
    );
    let response = app.send(upload_request(body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn upload_over_size_limit_is_rejected() {
    let app = TestApp::with_config(test_config(&[("MAX_UPLOAD_BYTES", "64")]));

    let body = multipart_body(
        &[
            ("name", "bob"),
            ("certificate_type", "visa"),
            ("document_name", "doc1"),
        ],
        Some(("photo.pdf", [b'a'; 512].as_slice())),
    );
    let response = app.send(upload_request(body)).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json_body(response).await["error"].is_string());
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn declared_oversize_upload_gets_json_error() {
    let app = TestApp::with_config(test_config(&[("MAX_UPLOAD_BYTES", "64")]));

    let body = multipart_body(
        &[
            ("name", "bob"),
            ("certificate_type", "visa"),
            ("document_name", "doc1"),
        ],
        Some(("photo.pdf", [b'a'; 512].as_slice())),
    );
    let mut request = upload_request(body.clone());
    request
        .headers_mut()
        .insert(header::CONTENT_LENGTH, body.len().into());
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let error = json_body(response).await["error"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(error.contains("too large"), "{error}");
    assert!(app.storage.is_empty());
}

#[tokio::test]
async fn storage_failures_map_to_server_errors() {
    let upload_fields = [
        ("name", "bob"),
        ("certificate_type", "visa"),
        ("document_name", "doc1"),
    ];

    let (status, body) = oneshot_list(failing_app(FailAt::List), "name=bob&certificate_type=visa").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching files: connection refused");

    for (fail_at, prefix) in [
        (FailAt::Exists, "Error checking folder existence: "),
        (FailAt::PutMarker, "Error creating folder: "),
        (FailAt::PutObject, "File upload failed: "),
    ] {
        let body = multipart_body(&upload_fields, Some(("photo.pdf", b"x".as_slice())));
        let (status, body) = oneshot_upload(failing_app(fail_at), body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{fail_at:?}");
        assert!(
            body["error"].as_str().unwrap().starts_with(prefix),
            "{fail_at:?}: {body}"
        );
    }
}

#[tokio::test]
async fn login_sets_session_cookie() {
    let app = TestApp::new();

    let response = app.send(login_request(USERNAME, PASSWORD, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("sessionid="));
    assert!(set_cookie.contains("HttpOnly"));
    assert_eq!(json_body(response).await, json!({ "message": "Login successful" }));
    assert_eq!(app.authenticator.sessions().len(), 1);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = TestApp::new();

    let response = app.send(login_request(USERNAME, "guess", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(json_body(response).await, json!({ "error": "Invalid credentials" }));

    let response = app.send(login_request("mallory", PASSWORD, None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(raw_login_request(
            br#"{"username":1,"password":"x"}"#.to_vec(),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid credentials" }));
}

#[tokio::test]
async fn login_validates_payload() {
    let app = TestApp::new();

    let response = app.send(raw_login_request(b"{not json".to_vec(), None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid JSON" }));

    let response = app
        .send(raw_login_request(br#"{"username":"alice"}"#.to_vec(), None))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Username and password are required." })
    );
}

#[tokio::test]
async fn login_replaces_previous_session() {
    let app = TestApp::new();

    let first = app.login().await;
    let response = app
        .send(login_request(USERNAME, PASSWORD, Some(&first)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = session_cookie(&response).unwrap();

    assert_ne!(first, second);
    assert_eq!(app.authenticator.sessions().len(), 1);
}

#[tokio::test]
async fn logout_ends_session() {
    let app = TestApp::new();
    let cookie = app.login().await;

    let response = app.send(logout_request(Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("Max-Age=0"));
    assert_eq!(json_body(response).await, json!({ "message": "Logout successful" }));

    // The same cookie no longer names a session
    let response = app.send(logout_request(Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_is_unauthorized() {
    let app = TestApp::new();

    let response = app.send(logout_request(None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "User is not authenticated" })
    );

    let response = app
        .send(logout_request(Some("sessionid=forged")))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_gate_protects_storage_routes() {
    let app = TestApp::with_config(test_config(&[("REQUIRE_SESSION", "true")]));
    let query = "name=alice&certificate_type=passport";

    let response = app.send(list_request(query)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = app.login().await;
    let mut request = list_request(query);
    request
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

async fn oneshot_list(app: axum::Router, query: &str) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(list_request(query)).await.unwrap();
    (response.status(), json_body(response).await)
}

async fn oneshot_upload(app: axum::Router, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(upload_request(body)).await.unwrap();
    (response.status(), json_body(response).await)
}

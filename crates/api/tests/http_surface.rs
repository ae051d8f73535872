//! HTTP behaviour that does not need a database: health degradation,
//! request ids, the logo listing, the admin token guard, and request bodies
//! rejected before any query runs.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    admin_json, admin_multipart, body_json, build_app, get, lazy_pool, send, test_config, text,
    Part, ADMIN_TOKEN,
};
use folio_core::storage::MemoryObjectStore;

fn app_with_config(config: folio_api::config::ServerConfig) -> axum::Router {
    build_app(lazy_pool(), Arc::new(MemoryObjectStore::new()), config)
}

fn app() -> axum::Router {
    app_with_config(test_config())
}

// ---------------------------------------------------------------------------
// Health and general behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_without_database() {
    let response = get(app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(app(), "/api/v1/admin/icons").await;

    let request_id = response.headers().get("x-request-id");
    assert!(request_id.is_some(), "Response must contain an x-request-id header");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = get(app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Logos
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logos_lists_image_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["sqlx.svg", "Axum.png", "notes.txt", "tokio.GIF"] {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }
    let config = folio_api::config::ServerConfig {
        logo_dir: dir.path().to_path_buf(),
        ..test_config()
    };

    let response = get(app_with_config(config), "/api/logos").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!(["Axum.png", "sqlx.svg", "tokio.GIF"]));
}

#[tokio::test]
async fn logos_unreadable_directory_returns_500() {
    let dir = tempfile::tempdir().unwrap();
    let config = folio_api::config::ServerConfig {
        logo_dir: dir.path().join("missing"),
        ..test_config()
    };

    let response = get(app_with_config(config), "/api/logos").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to read logo directory");
}

// ---------------------------------------------------------------------------
// Admin guard
// ---------------------------------------------------------------------------

async fn icons_with_header(app: axum::Router, authorization: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method(Method::GET).uri("/api/v1/admin/icons");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn admin_routes_require_authorization_header() {
    let response = icons_with_header(app(), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn admin_routes_reject_wrong_token() {
    let response = icons_with_header(app(), Some("Bearer not-the-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = icons_with_header(app(), Some(ADMIN_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_locked_when_no_token_configured() {
    let config = folio_api::config::ServerConfig {
        admin_token: None,
        ..test_config()
    };
    let header = format!("Bearer {ADMIN_TOKEN}");

    let response = icons_with_header(app_with_config(config), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Admin access is not configured");
}

#[tokio::test]
async fn icons_listed_for_admin() {
    let header = format!("Bearer {ADMIN_TOKEN}");
    let response = icons_with_header(app(), Some(&header)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"],
        serde_json::json!(["Laptop2Icon", "PictureInPictureIcon", "BarChart2"])
    );
}

// ---------------------------------------------------------------------------
// Rejected request bodies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn oversized_upload_returns_413_json() {
    let config = test_config();
    let oversized = vec![0u8; config.max_upload_bytes * 2];
    let parts = [
        text("title", "Big"),
        text("category_id", "1"),
        Part::File {
            field: "images",
            file_name: "big.png".to_string(),
            content_type: "image/png",
            bytes: oversized,
        },
    ];

    let response = admin_multipart(
        app_with_config(config),
        Method::POST,
        "/api/v1/admin/projects",
        &parts,
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PAYLOAD_TOO_LARGE");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn oversized_cv_upload_returns_413_json() {
    let config = test_config();
    let parts = [Part::File {
        field: "file",
        file_name: "cv.pdf".to_string(),
        content_type: "application/pdf",
        bytes: vec![b'%'; config.max_upload_bytes + 1],
    }];

    let response = admin_multipart(
        app_with_config(config),
        Method::POST,
        "/api/v1/admin/cvs",
        &parts,
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn category_json_missing_name_returns_json_error() {
    let response = admin_json(
        app(),
        Method::POST,
        "/api/v1/admin/categories",
        serde_json::json!({ "icon_name": "Laptop2Icon" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn category_update_with_malformed_json_returns_json_error() {
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/admin/categories/1")
        .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(app(), request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

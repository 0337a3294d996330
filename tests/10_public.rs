mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

#[tokio::test]
async fn root_describes_api() -> Result<()> {
    let res = common::get(common::test_app()?, "/", None).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.body["data"]["name"], "Support Desk API");
    Ok(())
}

#[tokio::test]
async fn health_reports_unreachable_database() -> Result<()> {
    let res = common::get(common::test_app()?, "/health", None).await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["data"]["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn login_validates_before_lookup() -> Result<()> {
    let res = common::post(
        common::test_app()?,
        "/auth/login",
        None,
        json!({ "email": "not-an-email", "password": "123" }),
    )
    .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(res.body["field_errors"]["email"], "Email is invalid");
    assert_eq!(
        res.body["field_errors"]["password"],
        "Password must be at least 6 characters long"
    );
    assert_eq!(res.body["fields"]["email"], "not-an-email");
    assert!(res.body["fields"].get("password").is_none());
    Ok(())
}

#[tokio::test]
async fn login_with_missing_fields_is_a_validation_error() -> Result<()> {
    let res = common::post(common::test_app()?, "/auth/login", None, json!({})).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"]["email"].is_string());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected() -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\":"))?;
    let res = common::send_request(common::test_app()?, request).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["success"], false);
    assert_eq!(res.body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn register_requires_a_service() -> Result<()> {
    let res = common::post(
        common::test_app()?,
        "/auth/register",
        None,
        json!({ "username": "jane", "email": "jane@example.com", "password": "secret1" }),
    )
    .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["field_errors"]["service"], "A service must be selected.");
    assert!(res.body["field_errors"].get("username").is_none());
    Ok(())
}

#[tokio::test]
async fn register_refuses_admin_service() -> Result<()> {
    let res = common::post(
        common::test_app()?,
        "/auth/register",
        None,
        json!({
            "username": "mallory",
            "email": "mallory@example.com",
            "password": "secret1",
            "service": "Information Technology"
        }),
    )
    .await?;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["code"], "FORBIDDEN");
    Ok(())
}

mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn protected_routes_require_token() -> Result<()> {
    for uri in ["/api/auth/whoami", "/api/board", "/api/tickets", "/api/tickets/new"] {
        let res = common::get(common::test_app()?, uri, None).await?;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(res.body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn non_bearer_and_forged_tokens_are_rejected() -> Result<()> {
    let request = axum::http::Request::builder()
        .uri("/api/tickets")
        .header("authorization", "Basic amFuZTpzZWNyZXQ=")
        .body(axum::body::Body::empty())?;
    let res = common::send_request(common::test_app()?, request).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = common::get(common::test_app()?, "/api/tickets", Some("not.a.token")).await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn ticket_form_errors_are_reported_per_field() -> Result<()> {
    let (_, token) = common::employee_token()?;
    let res = common::post(
        common::test_app()?,
        "/api/tickets",
        Some(&token),
        json!({ "title": "ab", "status": "", "product": "Laptop", "description": "1234567" }),
    )
    .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Form not submitted correctly.");
    assert_eq!(
        res.body["field_errors"]["title"],
        "The title must be at least 3 characters long."
    );
    assert_eq!(res.body["field_errors"]["status"], "A status must be selected.");
    assert_eq!(
        res.body["field_errors"]["description"],
        "Issue description must be at least 5 characters long."
    );
    assert!(res.body["field_errors"].get("product").is_none());
    assert_eq!(res.body["fields"]["product"], "Laptop");
    Ok(())
}

#[tokio::test]
async fn other_profiles_are_forbidden() -> Result<()> {
    let (_, token) = common::employee_token()?;
    let other = Uuid::new_v4();

    let res = common::get(common::test_app()?, &format!("/api/users/{}", other), Some(&token)).await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = common::send(
        common::test_app()?,
        Method::DELETE,
        &format!("/api/users/{}", other),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.body["error"], "You can only delete your own account");
    Ok(())
}

#[tokio::test]
async fn invalid_ticket_id_is_bad_request() -> Result<()> {
    let (_, token) = common::employee_token()?;
    let res = common::get(common::test_app()?, "/api/tickets/not-a-uuid", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn database_outage_surfaces_as_503() -> Result<()> {
    let (_, token) = common::employee_token()?;
    let res = common::get(common::test_app()?, "/api/tickets", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

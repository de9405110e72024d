mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

#[tokio::test]
async fn register_login_create_delete_flow() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.register("a@x.com", "secret1").await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = server.login("a@x.com", "secret1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["data"]["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let res = server.create_customer(&token, "Bob", "b@x.com").await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"], json!({"id": 1, "name": "Bob", "email": "b@x.com"}));

    // Same resource without credentials
    let res = server.client.get(server.url("/api/customers/1")).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server
        .client
        .delete(server.url("/api/customers/1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = server
        .client
        .get(server.url("/api/customers/1"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn root_banner_lists_endpoints() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["name"], "customer-api");
    assert!(body["data"]["endpoints"]["customers"].is_string());
    Ok(())
}

#[tokio::test]
async fn permissive_cors_echoes_any_origin() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .client
        .get(server.url("/health"))
        .header("origin", "http://frontend.test")
        .send()
        .await?;
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}

//! Endpoint contract integration tests.
//!
//! Exercises the banner, status, and info endpoints plus the
//! unconfigured-dependency behavior of the diagnostic routes.

use web_test_utils::TestServer;

#[tokio::test]
async fn test_home_banner_contains_name_and_version() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client.get(server.url()).send().await?;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "Production Observability Demo");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["environment"], "test");
    assert!(body["timestamp"].is_string());
    assert!(body["features"].as_array().is_some_and(|f| !f.is_empty()));

    Ok(())
}

#[tokio::test]
async fn test_api_status_contract() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/status", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["message"], "API is running");
    assert_eq!(body["service"], "web-service");
    assert_eq!(body["status"], "running");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// POST is not registered on /api/status; method+path match as one unit,
/// so the response is 404 rather than 405.
#[tokio::test]
async fn test_post_api_status_returns_404() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/status", server.url()))
        .json(&serde_json::json!({ "invalid": "data" }))
        .send()
        .await?;

    assert_eq!(response.status(), 404);

    Ok(())
}

#[tokio::test]
async fn test_api_info_reports_service_metadata() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/info", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["service"], "web-service");
    assert_eq!(body["environment"], "test");
    assert!(body["uptime_seconds"].as_f64().is_some());

    Ok(())
}

#[tokio::test]
async fn test_db_test_unconfigured_returns_503() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/db/test", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"], "Database not configured");

    Ok(())
}

#[tokio::test]
async fn test_redis_test_unconfigured_returns_503() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/redis/test", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"], "Redis not configured");

    Ok(())
}

#[tokio::test]
async fn test_users_unconfigured_returns_503() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/users", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"], "Database not configured");

    Ok(())
}

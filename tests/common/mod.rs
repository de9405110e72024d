#![allow(dead_code)]

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use customer_api::config::AppConfig;
use customer_api::database::DatabaseManager;
use customer_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Router running inside the test's runtime on a free port, backed by its
/// own in-memory database. Dropped together with the test.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::for_tests("sqlite::memory:", TEST_SECRET)).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        let pool = DatabaseManager::connect(&config.database).await?;
        DatabaseManager::migrate(&pool).await?;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        let app = customer_api::app(AppState::new(config, pool));
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await?)
    }

    /// Register then log in, returning the bearer token.
    pub async fn token_for(&self, email: &str) -> Result<String> {
        let res = self.register(email, "secret123").await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let body: Value = self.login(email, "secret123").await?.json().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("login response carried no token")
    }

    pub async fn create_customer(&self, token: &str, name: &str, email: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/api/customers"))
            .bearer_auth(token)
            .json(&json!({"name": name, "email": email}))
            .send()
            .await?)
    }
}

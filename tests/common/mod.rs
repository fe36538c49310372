#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use student_management_api::config::{AppConfig, StoreBackend};
use student_management_api::database::seed::seed_if_empty;
use student_management_api::database::{MemoryStore, Store};
use student_management_api::{app, AppState};

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start the router on a free port with a freshly seeded in-memory store.
    /// The server task lives on the calling test's runtime.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::development()).await
    }

    pub async fn spawn_with(mut config: AppConfig) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        config.server.host = "127.0.0.1".to_string();
        config.server.port = port;
        config.database.backend = StoreBackend::Memory;

        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        seed_if_empty(store.as_ref()).await?;

        let state = AppState::new(config.clone(), store)?;
        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    /// Token for the seeded admin account
    pub async fn admin_token(&self) -> Result<String> {
        let res = self.login("admin", "admin123").await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "admin login failed: {}", res.status());
        let body = res.json::<Value>().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("login response missing token")
    }
}

pub fn new_student() -> Value {
    json!({
        "nome": "Beatriz",
        "idade": 12,
        "serie": 7,
        "notaMedia": 9.25,
        "endereco": "Rua das Flores 10",
        "nomePai": "Carlos Souza",
        "nomeMae": "Maria Souza",
        "dataNascimento": "2011-03-02T00:00:00.000Z"
    })
}

use anyhow::{anyhow, bail, Context};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::database::models::Student;
use crate::handlers::public::LoginResponse;

/// Thin HTTP client over the API routes
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(base_url).with_context(|| format!("invalid server URL '{}'", base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("server URL must use http or https: {}", base_url);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> anyhow::Result<LoginResponse> {
        let request = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }));
        Self::json_body(request.send().await?).await
    }

    pub async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        let request = self.authorized(self.http.get(self.url("/api/students")))?;
        Self::json_body(request.send().await?).await
    }

    pub async fn get_student(&self, id: i32) -> anyhow::Result<Student> {
        let request = self.authorized(self.http.get(self.url(&format!("/api/students/{}", id))))?;
        Self::json_body(request.send().await?).await
    }

    pub async fn create_student(&self, body: &Value) -> anyhow::Result<Student> {
        let request = self.authorized(self.http.post(self.url("/api/students")).json(body))?;
        Self::json_body(request.send().await?).await
    }

    pub async fn update_student(&self, id: i32, body: &Value) -> anyhow::Result<()> {
        let request = self.authorized(
            self.http
                .put(self.url(&format!("/api/students/{}", id)))
                .json(body),
        )?;
        Self::empty_body(request.send().await?).await
    }

    pub async fn delete_student(&self, id: i32) -> anyhow::Result<()> {
        let request = self.authorized(self.http.delete(self.url(&format!("/api/students/{}", id))))?;
        Self::empty_body(request.send().await?).await
    }

    fn authorized(&self, request: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| anyhow!("no token: run `students auth login` and export STUDENTS_TOKEN"))?;
        Ok(request.bearer_auth(token))
    }

    async fn json_body<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
        let response = Self::check(response).await?;
        response.json::<T>().await.context("failed to decode response body")
    }

    async fn empty_body(response: Response) -> anyhow::Result<()> {
        Self::check(response).await?;
        Ok(())
    }

    /// Turn non-2xx responses into errors carrying the server's message
    async fn check(response: Response) -> anyhow::Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"))
            .to_string();

        match status {
            StatusCode::UNAUTHORIZED => bail!("unauthorized: {}", message),
            StatusCode::NOT_FOUND => bail!("not found: {}", message),
            _ => bail!("{} {}", status.as_u16(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_url() {
        let client = ApiClient::new("http://localhost:5001/", None).unwrap();
        assert_eq!(client.url("/api/students"), "http://localhost:5001/api/students");
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(ApiClient::new("ftp://localhost", None).is_err());
        assert!(ApiClient::new("localhost:5001", None).is_err());
    }

    #[tokio::test]
    async fn protected_calls_need_a_token() {
        let client = ApiClient::new("http://127.0.0.1:9", None).unwrap();
        let err = client.list_students().await.unwrap_err();
        assert!(err.to_string().contains("no token"));
    }
}

use anyhow::{anyhow, Context};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Thin JSON client for the HTTP API. Unwraps the `{success, data}` envelope and
/// turns error envelopes into `anyhow` errors carrying the server's message.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("invalid API URL: {}", base_url))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { http, base, token })
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        self.send(Method::GET, path, query, None::<&Value>).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        self.send(Method::PATCH, path, &[], Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.send(Method::DELETE, path, &[], None::<&Value>).await
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid API path: {}", path))
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> anyhow::Result<Value> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url.clone()).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let envelope: Value = response
            .json()
            .await
            .with_context(|| format!("invalid JSON from {}", url))?;

        unwrap_envelope(status, envelope)
    }
}

fn unwrap_envelope(status: StatusCode, envelope: Value) -> anyhow::Result<Value> {
    if status.is_success() {
        return Ok(envelope.get("data").cloned().unwrap_or(Value::Null));
    }

    let message = envelope
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("request failed");
    match envelope.get("code").and_then(Value::as_str) {
        Some(code) => Err(anyhow!("{} ({}, HTTP {})", message, code, status.as_u16())),
        None => Err(anyhow!("{} (HTTP {})", message, status.as_u16())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_data() {
        let data = unwrap_envelope(StatusCode::OK, json!({"success": true, "data": {"id": 1}})).unwrap();
        assert_eq!(data, json!({"id": 1}));
    }

    #[test]
    fn error_envelope_keeps_server_message() {
        let err = unwrap_envelope(
            StatusCode::CONFLICT,
            json!({"success": false, "error": true, "message": "Form name already exists", "code": "CONFLICT"}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Form name already exists (CONFLICT, HTTP 409)");
    }

    #[test]
    fn paths_join_onto_base() {
        let client = ApiClient::new("http://localhost:3000", None).unwrap();
        assert_eq!(
            client.endpoint("/api/forms/4/fields").unwrap().as_str(),
            "http://localhost:3000/api/forms/4/fields"
        );
    }
}

use crate::domain::error::AdminError;
use crate::domain::traits::Fetcher;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

/// Upstream fetcher backed by `reqwest`
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, AdminError> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = ensure_ok(response, url)?;
        Ok(response.json::<Value>().await?)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<(), AdminError> {
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        ensure_ok(response, url)?;
        Ok(())
    }
}

// Only 200 counts as success, matching the upstream services' contract.
fn ensure_ok(response: Response, url: &str) -> Result<Response, AdminError> {
    if response.status() != StatusCode::OK {
        return Err(AdminError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response)
}

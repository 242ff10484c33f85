use crate::domain::error::AdminError;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for upstream HTTP access
///
/// Every call is a single attempt: no retries, no backoff.
/// A non-200 response is reported as `AdminError::Status`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the parsed JSON body
    async fn get_json(&self, url: &str) -> Result<Value, AdminError>;

    /// POST `body` as JSON to `url`
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), AdminError>;
}

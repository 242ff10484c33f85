// HTTP client utilities
use crate::domain::error::AdminError;
use reqwest::Client;
use std::time::Duration;

/// Create the shared HTTP client used for every upstream call
pub fn create_client(timeout: Duration) -> Result<Client, AdminError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .user_agent(concat!("holdings-admin/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

use crate::application::resolver::CompanyResolver;
use crate::domain::error::AdminError;
use crate::domain::traits::Fetcher;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::{create_client, HttpFetcher};
use crate::infrastructure::storage::CompanyCache;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: CompanyCache,
    pub fetcher: Arc<dyn Fetcher>,
    pub resolver: CompanyResolver,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AdminError> {
        let http_client = create_client(config.request_timeout())?;
        Ok(Self::with_fetcher(
            config,
            Arc::new(HttpFetcher::new(http_client)),
        ))
    }

    /// Build state around a custom fetcher (tests, alternative transports)
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Self {
        let cache = CompanyCache::new();
        let resolver =
            CompanyResolver::new(cache.clone(), fetcher.clone(), config.companies_url());

        Self {
            config: Arc::new(config),
            cache,
            fetcher,
            resolver,
        }
    }
}

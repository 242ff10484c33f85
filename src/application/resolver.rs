use crate::domain::error::AdminError;
use crate::domain::model::CompanyRecord;
use crate::domain::traits::Fetcher;
use crate::infrastructure::storage::CompanyCache;
use futures_util::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

/// Looks up company details, going through the shared [`CompanyCache`].
#[derive(Clone)]
pub struct CompanyResolver {
    cache: CompanyCache,
    fetcher: Arc<dyn Fetcher>,
    companies_url: String,
}

impl CompanyResolver {
    /// `companies_url` is the collection URL, e.g. `http://host/companies`;
    /// lookups go to `{companies_url}/{id}`.
    pub fn new(
        cache: CompanyCache,
        fetcher: Arc<dyn Fetcher>,
        companies_url: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            fetcher,
            companies_url: companies_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn cache(&self) -> &CompanyCache {
        &self.cache
    }

    pub fn company_url(&self, id: &str) -> String {
        format!("{}/{}", self.companies_url, id)
    }

    /// Resolve a company id.
    ///
    /// Never fails: a lookup error is logged and turned into the
    /// "Unknown Holding" placeholder, which is not cached.
    pub async fn resolve(&self, id: &str) -> CompanyRecord {
        if let Some(cached) = self.cache.get(id) {
            tracing::trace!(%id, "company cache hit");
            return cached;
        }

        match self.fetch(id).await {
            Ok(record) => {
                self.cache.set(id, record.clone());
                record
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Failed to fetch company");
                CompanyRecord::unknown(id)
            }
        }
    }

    /// Resolve every id concurrently. Completion order is not defined.
    pub async fn resolve_all<I, S>(&self, ids: I) -> HashMap<String, CompanyRecord>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lookups = ids.into_iter().map(|id| {
            let id = id.into();
            async move {
                let record = self.resolve(&id).await;
                (id, record)
            }
        });

        join_all(lookups).await.into_iter().collect()
    }

    async fn fetch(&self, id: &str) -> Result<CompanyRecord, AdminError> {
        let body = self.fetcher.get_json(&self.company_url(id)).await?;
        Ok(serde_json::from_value::<CompanyRecord>(body)?)
    }
}

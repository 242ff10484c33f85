//! Company resolver behaviour: cache hits, population, placeholder fallback

mod common;

use common::{Reply, RecordingFetcher, COMPANIES_URL};
use holdings_admin::{CompanyCache, CompanyRecord, CompanyResolver, UNKNOWN_HOLDING_NAME};
use serde_json::json;
use std::sync::Arc;

fn resolver_with(fetcher: Arc<RecordingFetcher>) -> (CompanyResolver, CompanyCache) {
    let cache = CompanyCache::new();
    let resolver = CompanyResolver::new(cache.clone(), fetcher, COMPANIES_URL);
    (resolver, cache)
}

#[tokio::test]
async fn returns_cached_company_without_fetching() {
    let fetcher = Arc::new(RecordingFetcher::new());
    let (resolver, cache) = resolver_with(fetcher.clone());
    cache.set("1", CompanyRecord::new("1", "Cached Company"));

    let result = resolver.resolve("1").await;

    assert_eq!(result, CompanyRecord::new("1", "Cached Company"));
    assert_eq!(fetcher.get_count(), 0);
}

#[tokio::test]
async fn fetches_and_caches_company_on_miss() {
    let fetcher = Arc::new(RecordingFetcher::new().reply(
        "http://companies.test/companies/1",
        Reply::Json(json!({ "id": "1", "name": "Test Company" })),
    ));
    let (resolver, cache) = resolver_with(fetcher.clone());

    let result = resolver.resolve("1").await;

    assert_eq!(result, CompanyRecord::new("1", "Test Company"));
    assert_eq!(cache.get("1"), Some(CompanyRecord::new("1", "Test Company")));
    assert_eq!(fetcher.gets(), vec!["http://companies.test/companies/1"]);
}

#[tokio::test]
async fn failed_fetch_returns_placeholder_and_caches_nothing() {
    let fetcher = Arc::new(
        RecordingFetcher::new().reply("http://companies.test/companies/1", Reply::Status(500)),
    );
    let (resolver, cache) = resolver_with(fetcher.clone());

    let result = resolver.resolve("1").await;

    assert_eq!(result, CompanyRecord::new("1", UNKNOWN_HOLDING_NAME));
    assert_eq!(result, CompanyRecord::unknown("1"));
    assert!(!cache.contains("1"));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn undecodable_company_body_returns_placeholder() {
    let fetcher = Arc::new(RecordingFetcher::new().reply(
        "http://companies.test/companies/7",
        Reply::Json(json!(["not", "a", "company"])),
    ));
    let (resolver, cache) = resolver_with(fetcher);

    let result = resolver.resolve("7").await;

    assert_eq!(result, CompanyRecord::unknown("7"));
    assert!(cache.get("7").is_none());
}

#[tokio::test]
async fn placeholder_is_not_reused_so_failed_ids_are_retried() {
    let fetcher = Arc::new(
        RecordingFetcher::new().reply("http://companies.test/companies/1", Reply::Status(503)),
    );
    let (resolver, _cache) = resolver_with(fetcher.clone());

    resolver.resolve("1").await;
    resolver.resolve("1").await;

    assert_eq!(fetcher.get_count(), 2);
}

#[tokio::test]
async fn second_resolve_after_success_makes_one_remote_call() {
    let fetcher = Arc::new(RecordingFetcher::new().reply(
        "http://companies.test/companies/1",
        Reply::Json(json!({ "id": "1", "name": "Test Company" })),
    ));
    let (resolver, _cache) = resolver_with(fetcher.clone());

    let first = resolver.resolve("1").await;
    let second = resolver.resolve("1").await;

    assert_eq!(first, second);
    assert_eq!(fetcher.get_count(), 1);
}

#[tokio::test]
async fn clearing_the_cache_forces_a_fresh_fetch() {
    let fetcher = Arc::new(
        RecordingFetcher::new()
            .reply(
                "http://companies.test/companies/1",
                Reply::Json(json!({ "id": "1", "name": "One" })),
            )
            .reply(
                "http://companies.test/companies/2",
                Reply::Json(json!({ "id": "2", "name": "Two" })),
            ),
    );
    let (resolver, cache) = resolver_with(fetcher.clone());

    resolver.resolve("1").await;
    resolver.resolve("2").await;
    assert_eq!(cache.len(), 2);

    cache.clear_all();
    assert!(cache.get("1").is_none());
    assert!(cache.get("2").is_none());
    assert!(cache.last_cleared().is_some());

    resolver.resolve("1").await;
    assert_eq!(fetcher.get_count(), 3);
    assert!(cache.contains("1"));
}

#[tokio::test]
async fn upstream_extra_fields_are_kept() {
    let fetcher = Arc::new(RecordingFetcher::new().reply(
        "http://companies.test/companies/9",
        Reply::Json(json!({
            "id": "9",
            "name": "Acme",
            "address": "1 Road",
            "country": "UK"
        })),
    ));
    let (resolver, cache) = resolver_with(fetcher);

    let result = resolver.resolve("9").await;

    assert_eq!(result.name, "Acme");
    assert_eq!(result.extra.get("country"), Some(&json!("UK")));
    assert_eq!(cache.get("9"), Some(result));
}

#[tokio::test]
async fn resolve_all_mixes_hits_fetches_and_placeholders() {
    let fetcher = Arc::new(
        RecordingFetcher::new()
            .reply(
                "http://companies.test/companies/2",
                Reply::Json(json!({ "id": "2", "name": "Fetched" })),
            )
            .reply("http://companies.test/companies/3", Reply::Status(404)),
    );
    let (resolver, cache) = resolver_with(fetcher.clone());
    cache.set("1", CompanyRecord::new("1", "Cached"));

    let resolved = resolver.resolve_all(["1", "2", "3"]).await;

    assert_eq!(resolved.len(), 3);
    assert_eq!(resolved["1"].name, "Cached");
    assert_eq!(resolved["2"].name, "Fetched");
    assert_eq!(resolved["3"], CompanyRecord::unknown("3"));
    assert_eq!(fetcher.get_count(), 2);
    assert!(cache.contains("2"));
    assert!(!cache.contains("3"));
}

#[tokio::test]
async fn trailing_slash_on_companies_url_is_ignored() {
    let fetcher = Arc::new(RecordingFetcher::new());
    let resolver = CompanyResolver::new(
        CompanyCache::new(),
        fetcher,
        "http://companies.test/companies/",
    );

    assert_eq!(resolver.company_url("5"), "http://companies.test/companies/5");
}

pub mod client;
pub mod http;

pub use client::HttpFetcher;
pub use http::create_client;

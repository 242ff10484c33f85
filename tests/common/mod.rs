#![allow(dead_code)]

use async_trait::async_trait;
use holdings_admin::{AdminError, Fetcher, Holding, Investment};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

pub const COMPANIES_URL: &str = "http://companies.test/companies";

/// Canned reply for a URL
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
}

/// In-memory fetcher that records every call it receives
#[derive(Default)]
pub struct RecordingFetcher {
    replies: Mutex<HashMap<String, Reply>>,
    gets: Mutex<Vec<String>>,
    posts: Mutex<Vec<(String, Value)>>,
}

impl RecordingFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, url: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(url.to_string(), reply);
        self
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    pub fn get_count(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for RecordingFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, AdminError> {
        self.gets.lock().unwrap().push(url.to_string());
        let reply = self.replies.lock().unwrap().get(url).cloned();
        match reply {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::Status(status)) => Err(AdminError::Status {
                status,
                url: url.to_string(),
            }),
            None => Err(AdminError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<(), AdminError> {
        self.posts
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        Ok(())
    }
}

pub fn investment(user_id: &str, total: f64, holdings: Vec<Holding>) -> Investment {
    Investment {
        user_id: user_id.to_string(),
        first_name: format!("First{}", user_id),
        last_name: format!("Last{}", user_id),
        date: "2020-01-01".to_string(),
        investment_total: total,
        holdings,
    }
}

pub fn holdings(ids: &[&str]) -> Vec<Holding> {
    ids.iter().map(|id| Holding::new(*id, 0.5)).collect()
}

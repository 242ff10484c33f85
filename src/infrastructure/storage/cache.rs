// In-memory company cache using DashMap
use crate::domain::model::CompanyRecord;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Thread-safe company cache
///
/// Cloning is cheap and every clone shares the same entries. Entries never
/// expire on their own; they are dropped together by [`CompanyCache::clear_all`],
/// usually driven by [`CompanyCache::spawn_clear_task`].
#[derive(Clone, Default)]
pub struct CompanyCache {
    map: Arc<DashMap<String, CompanyRecord>>,
    last_cleared: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl CompanyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<CompanyRecord> {
        self.map.get(id).map(|entry| entry.value().clone())
    }

    pub fn set(&self, id: impl Into<String>, record: CompanyRecord) {
        self.map.insert(id.into(), record);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn clear_all(&self) {
        self.map.clear();
        if let Ok(mut guard) = self.last_cleared.write() {
            *guard = Some(Utc::now());
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// When the cache was last cleared, if ever
    pub fn last_cleared(&self) -> Option<DateTime<Utc>> {
        self.last_cleared.read().ok().and_then(|guard| *guard)
    }

    /// Start a background task that clears the cache every `every`.
    ///
    /// The first clear happens one full period after the call. Must be called
    /// from within a Tokio runtime.
    pub fn spawn_clear_task(&self, every: Duration) -> CacheClearHandle {
        let cache = self.clone();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let join = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = cache.len();
                        cache.clear_all();
                        tracing::info!(evicted, "company cache cleared");
                    }
                    _ = &mut stop_rx => {
                        tracing::debug!("company cache clear task stopped");
                        break;
                    }
                }
            }
        });

        CacheClearHandle {
            join,
            stop_tx: Some(stop_tx),
        }
    }
}

/// A handle for the running cache clear task.
pub struct CacheClearHandle {
    join: JoinHandle<()>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl CacheClearHandle {
    /// Ask the task to stop and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.join).await;
    }

    /// Abort the task immediately.
    pub fn abort(self) {
        self.join.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

// src/daemon/state.rs

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How a single invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Served,
    Failed,
    Unknown,
}

/// Per-function invocation counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallStats {
    pub served: u64,
    pub failed: u64,
    pub unknown: u64,
}

// Shared daemon state, cloned into every connection task
#[derive(Debug, Clone)]
pub struct DaemonState {
    inner: Arc<RwLock<InnerDaemonState>>,
}

#[derive(Debug, Default)]
struct InnerDaemonState {
    greeting: String,
    // (instance, function) -> counters
    calls: HashMap<(String, String), CallStats>,
}

impl DaemonState {
    pub fn new(greeting: impl Into<String>) -> Self {
        DaemonState {
            inner: Arc::new(RwLock::new(InnerDaemonState {
                greeting: greeting.into(),
                calls: HashMap::new(),
            })),
        }
    }

    pub async fn greeting(&self) -> String {
        self.inner.read().await.greeting.clone()
    }

    pub async fn record(&self, instance: &str, name: &str, outcome: Outcome) {
        let mut state = self.inner.write().await;
        let stats = state
            .calls
            .entry((instance.to_string(), name.to_string()))
            .or_default();
        match outcome {
            Outcome::Served => stats.served += 1,
            Outcome::Failed => stats.failed += 1,
            Outcome::Unknown => stats.unknown += 1,
        }
    }

    pub async fn stats(&self, instance: &str, name: &str) -> CallStats {
        self.inner
            .read()
            .await
            .calls
            .get(&(instance.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn all_stats(&self) -> Vec<((String, String), CallStats)> {
        let mut all: Vec<_> = self
            .inner
            .read()
            .await
            .calls
            .iter()
            .map(|(key, stats)| (key.clone(), stats.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        all
    }
}

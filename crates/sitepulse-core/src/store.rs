//! The visit log and its storage backends.
//!
//! Storage is deliberately dumb: every access round-trips through the
//! backend (no in-memory cache across requests), saves are full overwrites,
//! and there is no locking. Concurrent load→mutate→save sequences can drop
//! each other's writes at file granularity; analytics here is best-effort
//! and that race is part of the documented behavior.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::visit::Visit;

/// Hard cap on stored visits. Oldest records are evicted first once a save
/// would exceed it.
pub const MAX_VISITS: usize = 10_000;

/// The full analytics log, insertion-order = arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsLog {
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl AnalyticsLog {
    pub fn find_by_id(&self, id: &str) -> Option<&Visit> {
        self.visits.iter().find(|v| v.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Visit> {
        self.visits.iter_mut().find(|v| v.id == id)
    }

    /// Last-write-wins duration update for a heartbeat.
    ///
    /// A zero value leaves the stored duration unchanged, so a late or
    /// zeroed-out heartbeat cannot wipe a recorded duration. Returns whether
    /// the session id was found at all.
    pub fn update_duration(&mut self, id: &str, seconds: u64) -> bool {
        match self.find_by_id_mut(id) {
            Some(visit) => {
                if seconds != 0 {
                    visit.duration = seconds;
                }
                true
            }
            None => false,
        }
    }

    /// Increment the navigation counter for one session. Returns whether the
    /// session id was found.
    pub fn increment_nav(&mut self, id: &str) -> bool {
        match self.find_by_id_mut(id) {
            Some(visit) => {
                visit.nav_count += 1;
                true
            }
            None => false,
        }
    }

    /// Drop the oldest entries until the log fits in [`MAX_VISITS`].
    pub fn enforce_cap(&mut self) {
        if self.visits.len() > MAX_VISITS {
            let excess = self.visits.len() - MAX_VISITS;
            self.visits.drain(..excess);
        }
    }
}

/// Storage abstraction for the visit log.
///
/// `load` is infallible by contract: absent backing storage is initialized
/// empty, and corrupt storage is silently replaced by an empty log. The
/// worst outcome of any storage failure is lost analytics, never a failed
/// request.
#[async_trait]
pub trait VisitStore: Send + Sync {
    async fn load(&self) -> AnalyticsLog;

    /// Persist the log, enforcing the visit cap first. Full overwrite.
    async fn save(&self, log: &mut AnalyticsLog) -> Result<(), CoreError>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), CoreError>;
}

/// One JSON file holding `{"visits": [...]}`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl VisitStore for FileStore {
    async fn load(&self) -> AnalyticsLog {
        if !self.path.exists() {
            // Seed the file so the first save has a directory to land in;
            // if even this write fails we still serve the empty log.
            let _ = tokio::fs::write(&self.path, b"{\"visits\":[]}").await;
            return AnalyticsLog::default();
        }
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => AnalyticsLog::default(),
        }
    }

    async fn save(&self, log: &mut AnalyticsLog) -> Result<(), CoreError> {
        log.enforce_cap();
        let bytes = serde_json::to_vec(log)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        if self.path.exists() {
            tokio::fs::read(&self.path).await?;
        }
        Ok(())
    }
}

/// In-memory backend behind the same trait, for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    log: Mutex<AnalyticsLog>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn load(&self) -> AnalyticsLog {
        self.log.lock().await.clone()
    }

    async fn save(&self, log: &mut AnalyticsLog) -> Result<(), CoreError> {
        log.enforce_cap();
        *self.log.lock().await = log.clone();
        Ok(())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

//! # Reconnect Retention
//!
//! Clients that leave are held here for a while so a `Reconnecting` handshake can
//! restore the same identity and last-seen state.
//!
//! ## Features
//! - **TTL-based expiration**: entries expire after a configurable duration
//! - **Memory-bounded**: the oldest entry is evicted once `max_entries` is exceeded
//! - **Take semantics**: a successful lookup removes the entry

use super::client::Client;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace};
use uuid::Uuid;

/// Default number of departed clients kept
pub const DEFAULT_MAX_RETAINED: usize = 256;

/// Default time a departed client can still reconnect
pub const DEFAULT_RETENTION_TTL: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct RetainedEntry {
    client: Arc<Client>,
    retained_at: Instant,
}

impl RetainedEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.retained_at.elapsed() > ttl
    }
}

#[derive(Debug, Default)]
struct RetainedInner {
    entries: HashMap<Uuid, RetainedEntry>,
    total_inserts: u64,
}

/// Departed clients awaiting a possible reconnect
#[derive(Debug)]
pub struct RetainedClients {
    max_entries: usize,
    ttl: Duration,
    inner: Mutex<RetainedInner>,
}

impl Default for RetainedClients {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETAINED, DEFAULT_RETENTION_TTL)
    }
}

impl RetainedClients {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            max_entries,
            ttl,
            inner: Mutex::new(RetainedInner::default()),
        }
    }

    /// Retain `client`, replacing any earlier entry with the same id
    pub fn store(&self, client: Arc<Client>) {
        let mut inner = self.inner.lock();

        self.evict_expired(&mut inner);

        inner.entries.insert(
            client.id(),
            RetainedEntry {
                client,
                retained_at: Instant::now(),
            },
        );
        inner.total_inserts += 1;

        if inner.entries.len() > self.max_entries {
            self.evict_oldest(&mut inner);
        }

        trace!(retained = inner.entries.len(), "Client retained for reconnect");
    }

    /// Remove and return the client retained under `id`, unless it expired
    pub fn take(&self, id: &Uuid) -> Option<Arc<Client>> {
        let mut inner = self.inner.lock();
        let entry = inner.entries.remove(id)?;
        if entry.is_expired(self.ttl) {
            trace!(client = %id, "Retained client expired");
            return None;
        }
        Some(entry.client)
    }

    /// Drop a retained entry without restoring it
    pub fn forget(&self, id: &Uuid) {
        self.inner.lock().entries.remove(id);
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        let count = inner.entries.len();
        inner.entries.clear();
        debug!(cleared_count = count, "Retained clients cleared");
    }

    pub fn stats(&self) -> RetentionStats {
        let inner = self.inner.lock();
        RetentionStats {
            total_entries: inner.entries.len(),
            max_entries: self.max_entries,
            expired_count: inner
                .entries
                .values()
                .filter(|e| e.is_expired(self.ttl))
                .count(),
            total_inserts: inner.total_inserts,
        }
    }

    fn evict_expired(&self, inner: &mut RetainedInner) {
        let before = inner.entries.len();
        let ttl = self.ttl;
        inner.entries.retain(|_, entry| !entry.is_expired(ttl));
        let after = inner.entries.len();

        if before != after {
            debug!(
                removed_count = before - after,
                remaining_count = after,
                "Expired retained clients evicted"
            );
        }
    }

    fn evict_oldest(&self, inner: &mut RetainedInner) {
        if let Some(oldest) = inner
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.retained_at)
            .map(|(id, _)| *id)
        {
            inner.entries.remove(&oldest);
            debug!(client = %oldest, "Oldest retained client evicted");
        }
    }
}

/// Point-in-time view of the retention cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionStats {
    pub total_entries: usize,
    pub max_entries: usize,
    pub expired_count: usize,
    pub total_inserts: u64,
}

//! Observability and Metrics
//!
//! Atomic counters for codec, handshake and status activity. Each [`Registry`]
//! owns one [`Metrics`] behind an `Arc`, so independent registries (and tests) never
//! share counts.
//!
//! [`Registry`]: crate::registry::Registry

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Counters for one registry
#[derive(Debug)]
pub struct Metrics {
    /// Packet bodies decoded successfully
    pub packets_decoded: AtomicU64,
    /// Bodies rejected as shorter than their shape
    pub malformed_packets: AtomicU64,
    /// Total handshake attempts
    pub handshakes_total: AtomicU64,
    /// Successful handshakes
    pub handshakes_success: AtomicU64,
    /// Failed handshakes
    pub handshakes_failed: AtomicU64,
    /// Clients added to the live set
    pub clients_joined: AtomicU64,
    /// Clients removed from the live set
    pub clients_left: AtomicU64,
    /// Status snapshots built
    pub status_snapshots: AtomicU64,
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            packets_decoded: AtomicU64::new(0),
            malformed_packets: AtomicU64::new(0),
            handshakes_total: AtomicU64::new(0),
            handshakes_success: AtomicU64::new(0),
            handshakes_failed: AtomicU64::new(0),
            clients_joined: AtomicU64::new(0),
            clients_left: AtomicU64::new(0),
            status_snapshots: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn packet_decoded(&self) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn malformed_packet(&self) {
        self.malformed_packets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn handshake_attempt(&self) {
        self.handshakes_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn handshake_success(&self) {
        self.handshakes_success.fetch_add(1, Ordering::Relaxed);
    }

    pub fn handshake_failed(&self) {
        self.handshakes_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn client_joined(&self) {
        self.clients_joined.fetch_add(1, Ordering::Relaxed);
    }

    pub fn client_left(&self) {
        self.clients_left.fetch_add(1, Ordering::Relaxed);
    }

    pub fn status_snapshot(&self) {
        self.status_snapshots.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            malformed_packets: self.malformed_packets.load(Ordering::Relaxed),
            handshakes_total: self.handshakes_total.load(Ordering::Relaxed),
            handshakes_success: self.handshakes_success.load(Ordering::Relaxed),
            handshakes_failed: self.handshakes_failed.load(Ordering::Relaxed),
            clients_joined: self.clients_joined.load(Ordering::Relaxed),
            clients_left: self.clients_left.load(Ordering::Relaxed),
            status_snapshots: self.status_snapshots.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            packets_decoded = snapshot.packets_decoded,
            malformed_packets = snapshot.malformed_packets,
            handshakes_total = snapshot.handshakes_total,
            handshakes_success = snapshot.handshakes_success,
            handshakes_failed = snapshot.handshakes_failed,
            clients_joined = snapshot.clients_joined,
            clients_left = snapshot.clients_left,
            clients_active = snapshot.clients_active(),
            status_snapshots = snapshot.status_snapshots,
            uptime_seconds = snapshot.uptime_seconds,
            "Relay metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub packets_decoded: u64,
    pub malformed_packets: u64,
    pub handshakes_total: u64,
    pub handshakes_success: u64,
    pub handshakes_failed: u64,
    pub clients_joined: u64,
    pub clients_left: u64,
    pub status_snapshots: u64,
    pub uptime_seconds: u64,
}

impl MetricsSnapshot {
    pub fn clients_active(&self) -> u64 {
        self.clients_joined.saturating_sub(self.clients_left)
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );
    }
}

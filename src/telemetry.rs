//! Telemetry Module
//!
//! Collects anonymous usage statistics about the inventory service:
//! - Request volume and average latency
//! - Mutation counts (creates, updates, destroys)
//! - A bounded buffer of recent mutation events, flushed to disk as JSONL
//!
//! Privacy-first: events carry entity ids and brands only, never client
//! addresses or headers.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Mutation event types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MutationType {
    Created,
    Updated,
    Destroyed,
}

impl MutationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationType::Created => "created",
            MutationType::Updated => "updated",
            MutationType::Destroyed => "destroyed",
        }
    }
}

/// Single telemetry event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Unix timestamp
    pub timestamp: u64,
    /// Kind of mutation
    pub mutation: MutationType,
    /// Handling latency in milliseconds
    pub latency_ms: u64,
    /// Additional context (entity id/brand, no PII)
    pub context: String,
}

impl TelemetryEvent {
    pub fn new(mutation: MutationType, latency_ms: u64, context: String) -> Self {
        Self {
            timestamp: current_timestamp(),
            mutation,
            latency_ms,
            context,
        }
    }
}

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    /// Total requests served (reads and writes)
    pub requests_served: u64,
    /// Beers created over the process lifetime
    pub beers_created: u64,
    /// Beers updated over the process lifetime
    pub beers_updated: u64,
    /// Beers destroyed over the process lifetime
    pub beers_destroyed: u64,
    /// Average handling latency (ms)
    pub avg_latency_ms: f64,
    /// Period start timestamp
    pub period_start: u64,
    /// Period end timestamp
    pub period_end: u64,
}

/// Main telemetry collector
pub struct TelemetryCollector {
    /// Event buffer (in-memory)
    events: Arc<RwLock<Vec<TelemetryEvent>>>,
    /// Atomic counters for fast updates
    requests_served: AtomicU64,
    beers_created: AtomicU64,
    beers_updated: AtomicU64,
    beers_destroyed: AtomicU64,
    total_latency_ms: AtomicU64,
    /// Session start time
    session_start: u64,
    /// Export directory
    export_dir: PathBuf,
    /// Max events in memory before flush
    max_buffer_size: usize,
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryCollector {
    /// Create new collector with default settings
    pub fn new() -> Self {
        Self::with_config(PathBuf::from("./telemetry"), 1000)
    }

    /// Create collector with custom config
    pub fn with_config(export_dir: PathBuf, max_buffer_size: usize) -> Self {
        // Ensure export directory exists
        let _ = fs::create_dir_all(&export_dir);

        Self {
            events: Arc::new(RwLock::new(Vec::with_capacity(max_buffer_size))),
            requests_served: AtomicU64::new(0),
            beers_created: AtomicU64::new(0),
            beers_updated: AtomicU64::new(0),
            beers_destroyed: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            session_start: current_timestamp(),
            export_dir,
            max_buffer_size,
        }
    }

    /// Record a read request (list, health, stats)
    pub fn record_request(&self, latency_ms: u64) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
    }

    /// Record a mutation
    pub fn record_mutation(&self, event: TelemetryEvent) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(event.latency_ms, Ordering::Relaxed);

        match event.mutation {
            MutationType::Created => &self.beers_created,
            MutationType::Updated => &self.beers_updated,
            MutationType::Destroyed => &self.beers_destroyed,
        }
        .fetch_add(1, Ordering::Relaxed);

        // Buffer event
        if let Ok(mut events) = self.events.write() {
            events.push(event);

            // Auto-flush if buffer full
            if events.len() >= self.max_buffer_size {
                let events_to_flush = std::mem::take(&mut *events);
                drop(events); // Release lock before I/O
                let _ = self.flush_events(&events_to_flush);
            }
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        let requests_served = self.requests_served.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency = if requests_served > 0 {
            total_latency as f64 / requests_served as f64
        } else {
            0.0
        };

        TelemetryStats {
            requests_served,
            beers_created: self.beers_created.load(Ordering::Relaxed),
            beers_updated: self.beers_updated.load(Ordering::Relaxed),
            beers_destroyed: self.beers_destroyed.load(Ordering::Relaxed),
            avg_latency_ms: avg_latency,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Export current stats to JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        let stats = self.get_stats();
        let filename = format!("stats_{}.json", current_timestamp());
        let path = self.export_dir.join(filename);

        let json = serde_json::to_string_pretty(&stats)?;
        fs::write(&path, json)?;

        Ok(path)
    }

    /// Flush buffered events to disk
    fn flush_events(&self, events: &[TelemetryEvent]) -> Result<(), std::io::Error> {
        if events.is_empty() {
            return Ok(());
        }

        let filename = format!("events_{}.jsonl", current_timestamp());
        let path = self.export_dir.join(filename);

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        for event in events {
            if let Ok(json) = serde_json::to_string(event) {
                writeln!(file, "{}", json)?;
            }
        }

        Ok(())
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

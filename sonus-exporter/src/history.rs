//! Recent probe results per target.
//!
//! Each target keeps a bounded ring of its latest probes; the oldest entry is
//! evicted once the ring is full. Ids are unique across targets.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::debug;

/// Default number of entries retained per target.
pub const DEFAULT_CAPACITY: usize = 100;

/// One completed probe.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    /// Probe module name.
    pub kind: String,
    pub target: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    /// Captured log and rendered metrics; served by id, never listed.
    #[serde(skip)]
    pub debug_text: String,
}

/// Aggregate counts across all retained entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub targets: usize,
    pub entries: usize,
    pub failures: usize,
}

#[derive(Debug)]
pub struct ProbeHistory {
    rings: RwLock<HashMap<String, VecDeque<HistoryEntry>>>,
    capacity: usize,
    next_id: AtomicU64,
}

impl Default for ProbeHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ProbeHistory {
    /// Create a history retaining `capacity` entries per target.
    pub fn new(capacity: usize) -> Self {
        Self {
            rings: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a completed probe and return its id.
    pub fn record(
        &self,
        kind: impl Into<String>,
        target: impl Into<String>,
        success: bool,
        debug_text: String,
    ) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = HistoryEntry {
            id,
            kind: kind.into(),
            target: target.into(),
            timestamp: Utc::now(),
            success,
            debug_text,
        };
        debug!(id, target = %entry.target, success, "Recording probe result");

        let mut rings = self.rings.write();
        let ring = rings
            .entry(entry.target.clone())
            .or_insert_with(|| VecDeque::with_capacity(self.capacity));
        if ring.len() >= self.capacity {
            ring.pop_front();
        }
        ring.push_back(entry);
        id
    }

    /// Entries of one target, oldest first.
    pub fn entries(&self, target: &str) -> Vec<HistoryEntry> {
        self.rings
            .read()
            .get(target)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Entries of every target, ordered by id.
    pub fn all(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .rings
            .read()
            .values()
            .flat_map(|ring| ring.iter().cloned())
            .collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }

    /// Look up a retained entry by id.
    pub fn get(&self, id: u64) -> Option<HistoryEntry> {
        self.rings
            .read()
            .values()
            .flat_map(|ring| ring.iter())
            .find(|entry| entry.id == id)
            .cloned()
    }

    pub fn stats(&self) -> HistoryStats {
        let rings = self.rings.read();
        let mut stats = HistoryStats {
            targets: rings.len(),
            ..Default::default()
        };
        for entry in rings.values().flat_map(|ring| ring.iter()) {
            stats.entries += 1;
            if !entry.success {
                stats.failures += 1;
            }
        }
        stats
    }
}

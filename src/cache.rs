//! In-memory caching using moka
//!
//! Caches per-unit occupancy snapshots for calendar rendering, plus unit
//! rows for the public listing endpoints. Occupancy entries are invalidated
//! synchronously by every reservation create/delete before the write
//! returns, so a calendar read after a successful write always sees the
//! committed state. The TTL only bounds staleness from writes made by other
//! processes.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::booking::availability::Occupancy;
use crate::models::Unit;

/// Application cache holding occupancy snapshots and unit rows
#[derive(Clone)]
pub struct AppCache {
    /// Live occupancy from today (unit id -> Occupancy)
    pub occupancy: Cache<Uuid, Arc<Occupancy>>,
    /// Unit rows for listing/detail endpoints (unit id -> Unit)
    pub units: Cache<Uuid, Arc<Unit>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Occupancy: 500 units, 60s TTL; writes invalidate synchronously
            occupancy: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(60))
                .build(),

            // Units: 500 entries, 5 min TTL. The booking engine reads units
            // from the database, never from here, so rate snapshots used for
            // pricing are always current.
            units: Cache::builder()
                .max_capacity(500)
                .time_to_live(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            occupancy_size: self.occupancy.entry_count(),
            units_size: self.units.entry_count(),
        }
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.occupancy.invalidate_all();
        self.units.invalidate_all();
        debug!("All caches invalidated");
    }

    /// Drop the occupancy snapshot for one unit.
    ///
    /// Called by every write path (reservation create, block, unblock,
    /// status change) before it returns.
    pub async fn invalidate_unit_calendar(&self, unit_id: Uuid) {
        self.occupancy.invalidate(&unit_id).await;
        debug!("Occupancy cache invalidated for unit {}", unit_id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub occupancy_size: u64,
    pub units_size: u64,
}

//! Route cache for on-demand detail page generation
//!
//! Detail pages unknown at build time are generated on first request and
//! kept for a configurable time-to-live. Each route moves through an
//! explicit three-state lifecycle: `Generated` (fresh output on disk),
//! `Generating` (a request is producing it right now), and `Stale` (older
//! than the TTL, regenerated on next request).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Cache file name
const CACHE_FILE: &str = ".caravel-cache/routes.json";

/// Lifecycle state of one generated route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Generated,
    Generating,
    Stale,
}

/// Cached entry for a generated route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Unix timestamp of the last successful generation
    pub generated_at: u64,
    /// A request is currently generating this route
    pub in_flight: bool,
}

/// Cache database tracking on-demand generated routes
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouteCache {
    /// Version of the cache format
    pub version: u32,
    /// Time-to-live in seconds
    pub ttl_secs: u64,
    /// Entries keyed by post identifier
    pub routes: HashMap<String, RouteEntry>,
}

impl RouteCache {
    /// Current cache format version
    const VERSION: u32 = 1;

    pub fn new(ttl: Duration) -> Self {
        Self {
            version: Self::VERSION,
            ttl_secs: ttl.as_secs(),
            routes: HashMap::new(),
        }
    }

    /// Load cache from disk, or create a new empty cache. In-flight markers
    /// from a previous process do not survive a restart.
    pub fn load(base_dir: &Path, ttl: Duration) -> Self {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Ok(content) = fs::read_to_string(&cache_path) {
            if let Ok(mut cache) = serde_json::from_str::<RouteCache>(&content) {
                if cache.version == Self::VERSION {
                    cache.ttl_secs = ttl.as_secs();
                    for entry in cache.routes.values_mut() {
                        entry.in_flight = false;
                    }
                    return cache;
                }
                tracing::info!("Route cache version mismatch, starting fresh");
            }
        }
        Self::new(ttl)
    }

    /// Save cache to disk
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(cache_path, content)?;
        Ok(())
    }

    /// Status of a route, or `None` when it was never generated.
    pub fn status(&self, uid: &str) -> Option<RouteStatus> {
        self.status_at(uid, now_secs())
    }

    fn status_at(&self, uid: &str, now: u64) -> Option<RouteStatus> {
        let entry = self.routes.get(uid)?;
        if entry.in_flight {
            return Some(RouteStatus::Generating);
        }
        let age = now.saturating_sub(entry.generated_at);
        if age > self.ttl_secs {
            Some(RouteStatus::Stale)
        } else {
            Some(RouteStatus::Generated)
        }
    }

    /// Whether a request for this route should trigger generation now.
    pub fn needs_generation(&self, uid: &str) -> bool {
        !matches!(
            self.status(uid),
            Some(RouteStatus::Generated) | Some(RouteStatus::Generating)
        )
    }

    /// Mark a route as being generated by the current request.
    pub fn begin(&mut self, uid: &str) {
        let entry = self.routes.entry(uid.to_string()).or_insert(RouteEntry {
            generated_at: 0,
            in_flight: true,
        });
        entry.in_flight = true;
    }

    /// Record a successful generation.
    pub fn complete(&mut self, uid: &str) {
        self.routes.insert(
            uid.to_string(),
            RouteEntry {
                generated_at: now_secs(),
                in_flight: false,
            },
        );
    }

    /// Drop the in-flight marker after a failed generation.
    pub fn abort(&mut self, uid: &str) {
        if let Some(entry) = self.routes.get_mut(uid) {
            entry.in_flight = false;
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

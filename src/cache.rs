//! # Position cache
//!
//! Memoizes computed positions per `(body, Julian Day, precision)`, with a time-to-live
//! and a capacity bound. A full chart is stored under `body = None`, single bodies under
//! their own key, so [`crate::orrery::Orrery::calculate_position`] can be served from a
//! previously computed chart.
//!
//! Entries are written whole under a [`RwLock`]; concurrent batches may compute the
//! same entry twice, the last writer wins and both values are identical.
//!
//! Expiry is measured with an injectable [`Clock`] so tests can advance time without
//! sleeping.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::bodies::Body;
use crate::constants::JulianDay;
use crate::orrery_errors::OrreryError;
use crate::position::PlanetPosition;
use crate::series::PrecisionLevel;

/// Source of monotonic time for cache expiry.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// [`Clock`] that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    elapsed: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        *elapsed += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
        self.start + *elapsed
    }
}

/// Cache key. `body = None` denotes the full ten-body chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub body: Option<Body>,
    jd_bits: u64,
    pub precision: PrecisionLevel,
}

impl CacheKey {
    pub fn chart(jd: JulianDay, precision: PrecisionLevel) -> Self {
        CacheKey {
            body: None,
            jd_bits: jd.to_bits(),
            precision,
        }
    }

    pub fn body(body: Body, jd: JulianDay, precision: PrecisionLevel) -> Self {
        CacheKey {
            body: Some(body),
            jd_bits: jd.to_bits(),
            precision,
        }
    }

    pub fn julian_day(&self) -> JulianDay {
        f64::from_bits(self.jd_bits)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    positions: Arc<Vec<PlanetPosition>>,
    inserted: Instant,
}

/// TTL + capacity bounded store of computed positions.
#[derive(Debug)]
pub struct PositionCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

fn poisoned<T>(_: T) -> OrreryError {
    OrreryError::Cache("cache lock poisoned by a panicked writer".into())
}

impl PositionCache {
    /// Arguments
    /// ---------
    /// * `ttl`: lifetime of an entry
    /// * `capacity`: maximum number of entries, at least 1
    /// * `clock`: time source used for expiry
    pub fn new(ttl: Duration, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        PositionCache {
            entries: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted) >= self.ttl
    }

    /// Unexpired positions stored under `key`.
    ///
    /// Return
    /// ------
    /// * `Ok(None)` on a miss or an expired entry, [`OrreryError::Cache`] if the lock
    ///   is poisoned.
    pub fn get(&self, key: &CacheKey) -> Result<Option<Arc<Vec<PlanetPosition>>>, OrreryError> {
        let now = self.clock.now();
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .get(key)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| Arc::clone(&entry.positions)))
    }

    /// Store `positions` under `key`, evicting expired then oldest entries when full.
    pub fn insert(&self, key: CacheKey, positions: Vec<PlanetPosition>) -> Result<(), OrreryError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(poisoned)?;

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let before = entries.len();
            entries.retain(|_, entry| !self.is_expired(entry, now));
            if entries.len() >= self.capacity {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted)
                    .map(|(k, _)| *k);
                if let Some(oldest) = oldest {
                    entries.remove(&oldest);
                }
            }
            debug!(evicted = before - entries.len(), "position cache full");
        }

        entries.insert(
            key,
            CacheEntry {
                positions: Arc::new(positions),
                inserted: now,
            },
        );
        Ok(())
    }

    /// Drop every entry.
    pub fn clear(&self) -> Result<(), OrreryError> {
        self.entries.write().map_err(poisoned)?.clear();
        Ok(())
    }

    /// Drop the expired entries and return how many were removed.
    pub fn purge_expired(&self) -> Result<usize, OrreryError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(poisoned)?;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        Ok(before - entries.len())
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> Result<usize, OrreryError> {
        Ok(self.entries.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, OrreryError> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod cache_test {
    use super::*;
    use crate::coordinates::Corrections;
    use crate::position::{CalculationMethod, PositionQuality};

    fn dummy(body: Body) -> PlanetPosition {
        let quality = PositionQuality::primary(CalculationMethod::Vsop87, PrecisionLevel::High, 1);
        let mut p = PlanetPosition::from_raw(body, 12.0, 0.0, 1.0, quality, "test");
        p.corrections = Corrections::default();
        p
    }

    fn cache(ttl_secs: u64, capacity: usize) -> (PositionCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = PositionCache::new(Duration::from_secs(ttl_secs), capacity, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_hit_then_expire() {
        let (cache, clock) = cache(3600, 8);
        let key = CacheKey::body(Body::Mars, 2_451_545.0, PrecisionLevel::High);
        assert!(cache.get(&key).unwrap().is_none());

        cache.insert(key, vec![dummy(Body::Mars)]).unwrap();
        assert_eq!(cache.get(&key).unwrap().unwrap()[0].body, Body::Mars);

        clock.advance(Duration::from_secs(3599));
        assert!(cache.get(&key).unwrap().is_some());
        clock.advance(Duration::from_secs(1));
        assert!(cache.get(&key).unwrap().is_none());
        assert_eq!(cache.purge_expired().unwrap(), 1);
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_keys_distinguish_precision_and_chart() {
        let (cache, _) = cache(60, 8);
        let jd = 2_451_545.0;
        cache
            .insert(CacheKey::body(Body::Sun, jd, PrecisionLevel::High), vec![dummy(Body::Sun)])
            .unwrap();
        assert!(cache
            .get(&CacheKey::body(Body::Sun, jd, PrecisionLevel::Low))
            .unwrap()
            .is_none());
        assert!(cache.get(&CacheKey::chart(jd, PrecisionLevel::High)).unwrap().is_none());
        assert_eq!(CacheKey::chart(jd, PrecisionLevel::High).julian_day(), jd);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let (cache, clock) = cache(3600, 2);
        let keys: Vec<_> = [2_451_545.0, 2_451_546.0, 2_451_547.0]
            .iter()
            .map(|&jd| CacheKey::body(Body::Moon, jd, PrecisionLevel::High))
            .collect();
        for key in &keys {
            cache.insert(*key, vec![dummy(Body::Moon)]).unwrap();
            clock.advance(Duration::from_secs(1));
        }
        assert_eq!(cache.len().unwrap(), 2);
        assert!(cache.get(&keys[0]).unwrap().is_none());
        assert!(cache.get(&keys[1]).unwrap().is_some());
        assert!(cache.get(&keys[2]).unwrap().is_some());
    }

    #[test]
    fn test_poisoned_lock_reports_cache_error() {
        let (cache, _) = cache(60, 4);
        let cache = Arc::new(cache);
        let writer = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = writer.entries.write().unwrap();
            panic!("writer died");
        })
        .join();

        let key = CacheKey::chart(2_451_545.0, PrecisionLevel::High);
        assert!(matches!(cache.get(&key), Err(OrreryError::Cache(_))));
        assert!(matches!(cache.insert(key, vec![]), Err(OrreryError::Cache(_))));
    }
}

//! In-Memory Beer Store
//!
//! Thread-safe repository for the inventory. Uses DashMap for concurrent
//! access without lock contention, plus a monotonic insertion sequence so
//! listings have a stable order.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{Beer, BeerPatch, NewBeer};
use crate::errors::{AppError, AppResult};

/// Stored record: the entity plus its insertion sequence
#[derive(Clone, Debug)]
struct BeerRecord {
    seq: u64,
    beer: Beer,
}

/// Concurrent beer repository
#[derive(Clone)]
pub struct BeerStore {
    /// Internal storage: id -> record
    records: Arc<DashMap<Uuid, BeerRecord>>,
    /// Next insertion sequence
    next_seq: Arc<AtomicU64>,
    /// Lifetime counters
    created: Arc<AtomicU64>,
    updated: Arc<AtomicU64>,
    destroyed: Arc<AtomicU64>,
}

impl Default for BeerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BeerStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
            created: Arc::new(AtomicU64::new(0)),
            updated: Arc::new(AtomicU64::new(0)),
            destroyed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Insert a validated beer, assigning id, timestamps and sequence.
    pub fn create(&self, new: NewBeer) -> Beer {
        let now = chrono::Utc::now();
        let beer = Beer {
            id: Uuid::new_v4(),
            brand: new.brand,
            country: new.country,
            quantity: new.quantity,
            style: new.style,
            created_at: now,
            updated_at: now,
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.records.insert(
            beer.id,
            BeerRecord {
                seq,
                beer: beer.clone(),
            },
        );
        self.created.fetch_add(1, Ordering::Relaxed);
        info!("🍺 STORE CREATE: {} ({})", beer.brand, beer.id);
        beer
    }

    /// Fetch a single beer by id.
    pub fn get(&self, id: Uuid) -> Option<Beer> {
        self.records.get(&id).map(|r| r.beer.clone())
    }

    /// All beers in insertion order. Updates do not move an entry.
    pub fn list(&self) -> Vec<Beer> {
        let mut records: Vec<BeerRecord> =
            self.records.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.seq);
        records.into_iter().map(|r| r.beer).collect()
    }

    /// First beer in listing order, if any.
    pub fn first(&self) -> Option<Beer> {
        self.records
            .iter()
            .min_by_key(|r| r.value().seq)
            .map(|r| r.value().beer.clone())
    }

    /// Apply a validated patch to an existing beer.
    pub fn update(&self, id: Uuid, patch: BeerPatch) -> AppResult<Beer> {
        let mut record = self
            .records
            .get_mut(&id)
            .ok_or_else(|| AppError::beer_not_found(id))?;
        patch.apply(&mut record.beer);
        record.beer.updated_at = chrono::Utc::now();
        self.updated.fetch_add(1, Ordering::Relaxed);
        debug!("STORE UPDATE: {}", id);
        Ok(record.beer.clone())
    }

    /// Remove a beer, returning the removed entity.
    pub fn destroy(&self, id: Uuid) -> AppResult<Beer> {
        let (_, record) = self
            .records
            .remove(&id)
            .ok_or_else(|| AppError::beer_not_found(id))?;
        self.destroyed.fetch_add(1, Ordering::Relaxed);
        info!("🗑️ STORE DESTROY: {} ({})", record.beer.brand, id);
        Ok(record.beer)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of entry count and lifetime counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.records.len(),
            created_total: self.created.load(Ordering::Relaxed),
            updated_total: self.updated.load(Ordering::Relaxed),
            destroyed_total: self.destroyed.load(Ordering::Relaxed),
        }
    }

    /// Seed a small sample inventory. Used at startup when TAPROOM_SEED is
    /// set; stands in for the original fixtures.
    pub fn seed_samples(&self) -> usize {
        let samples = [
            ("Augustiner", "Germany", 20, "Helles"),
            ("Orval", "Belgium", 12, "Trappist Ale"),
            ("Pilsner Urquell", "Czechia", 24, "Pilsner"),
        ];
        for (brand, country, quantity, style) in samples {
            self.create(NewBeer {
                brand: brand.to_string(),
                country: country.to_string(),
                quantity,
                style: style.to_string(),
            });
        }
        samples.len()
    }
}

/// Store counters for monitoring
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub entries: usize,
    pub created_total: u64,
    pub updated_total: u64,
    pub destroyed_total: u64,
}

//! The in-memory subscription store.

use crate::error::{Result, StoreError};
use crate::types::{fixtures, NewSubscription, Subscription, SubscriptionId, SubscriptionPatch, Timestamp};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Store configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Whether to start with the two fixture records.
    pub seed_fixtures: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_fixtures: true,
        }
    }
}

struct Inner {
    /// Records in insertion order.
    records: Vec<Subscription>,

    /// Last numeric id handed out by `insert`.
    last_id: u64,
}

/// The authoritative collection of subscription records.
///
/// Every operation holds the lock only for its own duration. Concurrent
/// edits to the same record are last-write-wins.
pub struct Store {
    inner: RwLock<Inner>,
    clock: fn() -> Timestamp,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                records: Vec::new(),
                last_id: 0,
            }),
            clock: Timestamp::now,
        }
    }

    /// Create a store holding the fixture records.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.inner.write().records = fixtures();
        store
    }

    /// Create a store from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.seed_fixtures {
            Self::seeded()
        } else {
            Self::new()
        }
    }

    /// Create a store from existing records, rejecting duplicate ids.
    ///
    /// Entry point for embedders that load records from elsewhere. Ids issued
    /// afterwards still skip every id already present.
    pub fn with_records(records: Vec<Subscription>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(StoreError::DuplicateId(record.id.clone()));
            }
        }

        let store = Self::new();
        store.inner.write().records = records;
        Ok(store)
    }

    #[cfg(test)]
    fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    // --- Queries ---

    /// All records in insertion order.
    pub fn list_all(&self) -> Vec<Subscription> {
        self.inner.read().records.clone()
    }

    /// Look up a record. Absence is not an error.
    pub fn find_by_id(&self, id: &SubscriptionId) -> Option<Subscription> {
        self.inner
            .read()
            .records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }

    /// Distinct categories, in order of first appearance.
    pub fn list_categories(&self) -> Vec<String> {
        let inner = self.inner.read();
        let mut seen = HashSet::new();
        inner
            .records
            .iter()
            .filter(|record| seen.insert(record.category.as_str()))
            .map(|record| record.category.clone())
            .collect()
    }

    // --- Mutations ---

    /// Append a new record with a store-assigned id.
    pub fn insert(&self, input: NewSubscription) -> Subscription {
        let mut inner = self.inner.write();
        let id = Self::next_id(&mut inner, (self.clock)());
        let record = input.into_record(id);
        inner.records.push(record.clone());

        debug!(id = %record.id, name = %record.name, "inserted subscription");
        record
    }

    /// Overwrite the supplied fields of an existing record.
    pub fn update(&self, id: &SubscriptionId, patch: SubscriptionPatch) -> Result<Subscription> {
        let mut inner = self.inner.write();
        let record = inner
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| StoreError::SubscriptionNotFound(id.clone()))?;

        patch.apply_to(record);

        debug!(id = %id, "updated subscription");
        Ok(record.clone())
    }

    /// Remove a record. Returns false if no record has that id.
    pub fn remove(&self, id: &SubscriptionId) -> bool {
        let mut inner = self.inner.write();
        match inner.records.iter().position(|record| &record.id == id) {
            Some(index) => {
                inner.records.remove(index);
                debug!(id = %id, "removed subscription");
                true
            }
            None => false,
        }
    }

    /// Ids are the clock in milliseconds, bumped past the last issued id
    /// and past any existing record that already uses the value.
    fn next_id(inner: &mut Inner, now: Timestamp) -> SubscriptionId {
        let mut candidate = now.0.max(inner.last_id.saturating_add(1));
        loop {
            let id = SubscriptionId(candidate.to_string());
            if !inner.records.iter().any(|record| record.id == id) {
                inner.last_id = candidate;
                return id;
            }
            candidate = candidate.saturating_add(1);
        }
    }
}

//! Per-product persisted rating records.
//!
//! Each product's votes live under their own storage key. Votes are 1-5
//! stars; the record keeps the individual votes so the average is always
//! recomputable from them.

use fasco_core::ProductId;
use serde::{Deserialize, Serialize};

use crate::storage::{self, SharedStore, keys};

/// Persisted rating state for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingRecord {
    /// Number of votes cast.
    #[serde(default)]
    pub count: u32,
    /// Running average of `individual`.
    #[serde(default)]
    pub average: f64,
    /// Every vote in submission order, each 1-5.
    #[serde(default)]
    pub individual: Vec<u8>,
}

impl RatingRecord {
    /// Average rounded to the nearest whole star, for star-row display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_average(&self) -> u8 {
        let rounded = self.average.round();
        if rounded <= 0.0 {
            0
        } else if rounded >= 5.0 {
            5
        } else {
            // In 0..=5 after the clamps above
            rounded as u8
        }
    }
}

/// Store for per-product rating records.
#[derive(Clone)]
pub struct RatingStore {
    store: SharedStore,
}

impl RatingStore {
    /// Create a store over shared persistence.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// The persisted record for a product; absent or corrupt state reads as
    /// the zero record.
    #[must_use]
    pub fn get(&self, id: ProductId) -> RatingRecord {
        storage::read_json(self.store.as_ref(), &keys::ratings(id)).unwrap_or_default()
    }

    /// Record a vote, clamped to 1-5 stars, and persist the updated record.
    pub fn add_vote(&self, id: ProductId, stars: u8) -> RatingRecord {
        let stars = stars.clamp(1, 5);
        let mut record = self.get(id);
        record.individual.push(stars);
        record.count = u32::try_from(record.individual.len()).unwrap_or(u32::MAX);
        let sum: u64 = record.individual.iter().map(|&v| u64::from(v)).sum();
        #[allow(clippy::cast_precision_loss)] // Vote totals never exceed f64 precision
        let sum = sum as f64;
        record.average = sum / f64::from(record.count);
        storage::write_json(self.store.as_ref(), &keys::ratings(id), &record);
        record
    }
}

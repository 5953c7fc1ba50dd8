//! Shared test fixtures for the catalog SDK integration tests.
//!
//! Provides sample product records and an in-memory [`ProductSource`] that
//! filters like the real listing endpoint and records every request it sees.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use catalog_sdk::{CatalogError, ProductRecord, ProductSource, RequestDescriptor, Result};

/// Build a record with `external_id = id + 100_000`.
pub fn record(id: u64, name: &str, basic: f64, discounted: f64, rating: f64, feedbacks: u64) -> ProductRecord {
    ProductRecord {
        id,
        external_id: id + 100_000,
        name: name.to_string(),
        price_basic: Some(basic),
        price_with_discount: Some(discounted),
        rating: Some(rating),
        feedbacks: Some(feedbacks),
    }
}

/// Record with only a name set; other fields are fixed.
pub fn named(id: u64, name: &str) -> ProductRecord {
    record(id, name, 1000.0, 900.0, 4.5, 10)
}

/// Record with only a discounted price set.
pub fn priced(id: u64, discounted: f64) -> ProductRecord {
    record(id, &format!("item-{}", id), discounted + 100.0, discounted, 4.5, 10)
}

pub fn sample_records() -> Vec<ProductRecord> {
    vec![
        record(1, "T-shirt basic", 1200.0, 800.0, 4.9, 1500),
        record(2, "hoodie", 4500.0, 3100.0, 4.7, 320),
        record(3, "Socks (3 pairs)", 600.0, 450.0, 4.9, 12000),
        record(4, "Jacket", 12000.0, 9900.0, 4.8, 2100),
        record(5, "cap", 900.0, 950.0, 4.2, 80),
    ]
}

pub fn names(records: &[ProductRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

pub fn ids(records: &[ProductRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

// ---------------------------------------------------------------------------
// FakeSource
// ---------------------------------------------------------------------------

/// In-memory listing source.
///
/// Applies the four filters the way the listing endpoint does (all on the
/// discounted price) and keeps a log of received descriptors. Can be switched
/// into a failing mode to simulate transport errors.
pub struct FakeSource {
    records: Vec<ProductRecord>,
    failing: AtomicBool,
    calls: Mutex<Vec<RequestDescriptor>>,
}

impl FakeSource {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self {
            records,
            failing: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<RequestDescriptor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ProductSource for FakeSource {
    fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<ProductRecord>> {
        self.calls.lock().unwrap().push(*request);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Status {
                status: 502,
                url: "http://fake/api/products/".to_string(),
            });
        }
        Ok(self
            .records
            .iter()
            .filter(|r| r.price_with_discount.is_some_and(|p| p >= request.min_price))
            .filter(|r| r.price_with_discount.is_some_and(|p| p <= request.max_price))
            .filter(|r| r.rating.is_some_and(|v| v >= request.min_rating))
            .filter(|r| r.feedbacks.is_some_and(|n| n as f64 >= request.min_feedbacks))
            .cloned()
            .collect())
    }
}

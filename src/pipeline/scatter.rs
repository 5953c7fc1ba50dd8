//! Discount-vs-rating series.

use crate::models::{ProductRecord, ScatterPoint};

/// Map every record to a point, keeping the input order.
///
/// Callers pass the collection in server order; display sorting must not
/// affect this series.
pub fn derive_scatter(records: &[ProductRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .map(|r| ScatterPoint {
            discount: r.discount(),
            rating: r.rating,
        })
        .collect()
}

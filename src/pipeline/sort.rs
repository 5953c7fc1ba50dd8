//! Client-side ordering of a fetched record collection.

use std::cmp::Ordering;

use crate::models::ProductRecord;
use crate::state::{SortDirection, SortField, SortState};

/// Per-record value compared by the sort routine.
enum SortKey {
    Text(String),
    Number(f64),
    Count(u64),
}

impl SortKey {
    fn of(record: &ProductRecord, field: SortField) -> Option<Self> {
        match field {
            SortField::None => None,
            SortField::Name => Some(SortKey::Text(record.name.to_lowercase())),
            SortField::DiscountedPrice => Some(SortKey::Number(record.discounted_price())),
            SortField::Rating => Some(SortKey::Number(record.rating.unwrap_or(0.0))),
            SortField::Feedbacks => Some(SortKey::Count(record.feedbacks.unwrap_or(0))),
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Count(a), SortKey::Count(b)) => a.cmp(b),
            // Keys of one sort pass always come from the same field.
            _ => Ordering::Equal,
        }
    }
}

/// Return `records` ordered by `sort`, leaving the input untouched.
///
/// The sort is stable in both directions: descending flips each comparison
/// rather than reversing the result, so tied records keep their input order.
/// With [`SortField::None`] the server order is returned as-is. Missing
/// numeric fields sort as `0`.
pub fn sort_records(records: &[ProductRecord], sort: &SortState) -> Vec<ProductRecord> {
    let field = sort.field();
    if field == SortField::None {
        return records.to_vec();
    }
    let mut keyed: Vec<(SortKey, &ProductRecord)> = records
        .iter()
        .filter_map(|r| SortKey::of(r, field).map(|k| (k, r)))
        .collect();

    let direction = sort.direction();
    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.compare(b);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

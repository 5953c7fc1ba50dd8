//! Record pipeline: client-side sorting plus the two chart datasets.
//!
//! Every function here is pure and takes the record collection by slice, so
//! the same fetched collection can feed the sorted table and the charts.

pub mod histogram;
pub mod scatter;
pub mod sort;

pub use histogram::{derive_histogram, derive_histogram_with_width};
pub use scatter::derive_scatter;
pub use sort::sort_records;

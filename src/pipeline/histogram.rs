//! Price-distribution histogram over discounted prices.

use tracing::warn;

use crate::config;
use crate::error::{CatalogError, Result};
use crate::models::{HistogramBin, ProductRecord};

/// Bin records by discounted price into 1000-wide bins covering `[0, upper_bound]`.
///
/// One bin is emitted for every multiple of the bin width up to and including
/// `upper_bound`, so the last bin may extend past it. Empty bins are kept.
/// A zero, negative or non-finite bound produces the single bin `0-999`.
/// Records without a discounted price count as priced at `0`.
pub fn derive_histogram(records: &[ProductRecord], upper_bound: f64) -> Vec<HistogramBin> {
    bin_records(records, upper_bound, config::HISTOGRAM_BIN_WIDTH)
}

/// Same as [`derive_histogram`] with a custom bin width.
pub fn derive_histogram_with_width(
    records: &[ProductRecord],
    upper_bound: f64,
    width: u64,
) -> Result<Vec<HistogramBin>> {
    if width == 0 {
        return Err(CatalogError::InvalidArgument(
            "histogram bin width must be positive".to_string(),
        ));
    }
    Ok(bin_records(records, upper_bound, width))
}

fn bin_records(records: &[ProductRecord], upper_bound: f64, width: u64) -> Vec<HistogramBin> {
    let bound = if upper_bound.is_finite() && upper_bound > 0.0 {
        upper_bound
    } else {
        0.0
    };
    let step = width as f64;
    let last = (bound / step).floor();
    let max_last = (config::MAX_HISTOGRAM_BINS - 1) as f64;
    if last > max_last {
        warn!(
            upper_bound,
            max = config::MAX_HISTOGRAM_BINS,
            "histogram bound too large; truncating bins"
        );
    }
    let bin_count = last.min(max_last) as usize + 1;

    let mut counts = vec![0usize; bin_count];
    for record in records {
        let price = record.discounted_price();
        if !price.is_finite() || price < 0.0 {
            continue;
        }
        let idx = (price / step).floor();
        if idx < bin_count as f64 {
            counts[idx as usize] += 1;
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = (i as u64).saturating_mul(width);
            let hi = lo.saturating_add(width - 1);
            HistogramBin {
                label: format!("{}-{}", lo, hi),
                count,
            }
        })
        .collect()
}

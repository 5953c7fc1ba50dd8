use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HistogramBin: Record count for one half-open price interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    #[serde(rename = "priceRange")]
    pub label: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// ScatterPoint: Discount vs rating for one record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub discount: f64,
    /// `None` when the record has no rating; charts leave a gap there.
    pub rating: Option<f64>,
}

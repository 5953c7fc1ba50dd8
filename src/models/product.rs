use serde::{Deserialize, Serialize};

use crate::config;

// ---------------------------------------------------------------------------
// ProductRecord: Single product row returned by the listing endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductRecord {
    pub id: u64,
    #[serde(rename = "id_wb")]
    pub external_id: u64,
    pub name: String,
    #[serde(default)]
    pub price_basic: Option<f64>,
    #[serde(default)]
    pub price_with_discount: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub feedbacks: Option<u64>,
}

impl ProductRecord {
    /// Basic price minus discounted price. Negative when the source data
    /// lists a discounted price above the basic one. A missing price counts
    /// as `0`.
    pub fn discount(&self) -> f64 {
        self.price_basic.unwrap_or(0.0) - self.discounted_price()
    }

    /// Discounted price used for ordering and binning; `0` when missing.
    pub fn discounted_price(&self) -> f64 {
        self.price_with_discount.unwrap_or(0.0)
    }

    /// Deep link to the product's page on the marketplace.
    pub fn listing_url(&self) -> String {
        format!("{}/{}/detail.aspx/", config::LISTING_URL_BASE, self.external_id)
    }
}

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const PRODUCTS_PATH: &str = "/api/products/";
pub const LISTING_URL_BASE: &str = "https://www.wildberries.ru/catalog";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "CATALOG_API_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const HISTOGRAM_BIN_WIDTH: u64 = 1000;
pub const MAX_HISTOGRAM_BINS: usize = 1_000_000;

pub const PRICE_SLIDER_MAX: f64 = 100_000.0;
pub const PRICE_SLIDER_STEP: f64 = 500.0;

// Initial filter values shown when the catalog is first opened.
pub const DEFAULT_PRICE_MIN: f64 = 0.0;
pub const DEFAULT_PRICE_MAX: f64 = 10_000.0;
pub const DEFAULT_MIN_RATING: f64 = 4.8;
pub const DEFAULT_MIN_FEEDBACKS: f64 = 1000.0;

pub fn default_base_url() -> String {
    match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_BASE_URL.to_string(),
    }
}

/// Round a price to the nearest slider step, clamped to `[0, PRICE_SLIDER_MAX]`.
///
/// Non-finite input snaps to 0.
pub fn snap_to_slider_step(price: f64) -> f64 {
    if !price.is_finite() {
        return 0.0;
    }
    let snapped = (price / PRICE_SLIDER_STEP).round() * PRICE_SLIDER_STEP;
    snapped.clamp(0.0, PRICE_SLIDER_MAX)
}


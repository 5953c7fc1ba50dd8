//! Request descriptor construction for the product listing endpoint.
//!
//! The descriptor always carries exactly four numeric parameters. Rating and
//! feedback values are not validated here: out-of-range numbers and `NaN` go
//! to the server as-is. Only the price range is kept in order.
//!
//! # Example
//!
//! ```rust
//! use catalog_sdk::{FilterState, QueryBuilder};
//! let descriptor = QueryBuilder::new(&FilterState::default())
//!     .max_price(5000.0)
//!     .min_rating(4.5)
//!     .build();
//! assert_eq!(descriptor.query_pairs()[1], ("max_price", "5000".to_string()));
//! ```

use serde::Serialize;

use crate::state::FilterState;

// ---------------------------------------------------------------------------
// NumericInput
// ---------------------------------------------------------------------------

/// Result of coercing a text field to a number.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    Value(f64),
    /// The raw text that failed to parse.
    Invalid(String),
}

/// Coerce text from a numeric input field.
///
/// Surrounding whitespace is ignored and an empty field counts as `0`, the
/// same way a browser number field reports it. Infinity is only accepted when
/// spelled `Infinity` (optionally signed) or reached by overflow such as
/// `1e400`; spellings like `inf` are invalid.
pub fn coerce_number(text: &str) -> NumericInput {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return NumericInput::Value(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => NumericInput::Invalid(text.to_string()),
        Ok(v) if v.is_infinite() && !accepts_infinity(trimmed) => {
            NumericInput::Invalid(text.to_string())
        }
        Ok(v) => NumericInput::Value(v),
        Err(_) => NumericInput::Invalid(text.to_string()),
    }
}

fn accepts_infinity(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned == "Infinity" || unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

// ---------------------------------------------------------------------------
// RequestDescriptor
// ---------------------------------------------------------------------------

/// Query parameters for one listing request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub min_price: f64,
    pub max_price: f64,
    pub min_rating: f64,
    pub min_feedbacks: f64,
}

impl RequestDescriptor {
    /// Render the parameters as `(key, value)` pairs in a fixed order.
    ///
    /// Numbers use Rust's shortest round-trip formatting, so `1000.0` becomes
    /// `"1000"` and `NaN` becomes `"NaN"`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("min_price", self.min_price.to_string()),
            ("max_price", self.max_price.to_string()),
            ("min_rating", self.min_rating.to_string()),
            ("min_feedbacks", self.min_feedbacks.to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// QueryBuilder
// ---------------------------------------------------------------------------

/// Builds a [`RequestDescriptor`] from filter state.
///
/// Starts from the given [`FilterState`]; individual parameters can be
/// overridden before calling [`build`](Self::build). Methods return
/// `&mut Self` for chaining.
pub struct QueryBuilder {
    min_price: f64,
    max_price: f64,
    min_rating: f64,
    min_feedbacks: f64,
}

impl QueryBuilder {
    /// Create a builder seeded from the current filter state.
    pub fn new(filter: &FilterState) -> Self {
        Self {
            min_price: filter.price_min(),
            max_price: filter.price_max(),
            min_rating: filter.min_rating(),
            min_feedbacks: filter.min_feedbacks(),
        }
    }

    pub fn min_price(&mut self, value: f64) -> &mut Self {
        self.min_price = value;
        self
    }

    pub fn max_price(&mut self, value: f64) -> &mut Self {
        self.max_price = value;
        self
    }

    pub fn min_rating(&mut self, value: f64) -> &mut Self {
        self.min_rating = value;
        self
    }

    pub fn min_feedbacks(&mut self, value: f64) -> &mut Self {
        self.min_feedbacks = value;
        self
    }

    /// Build the descriptor. Never fails.
    ///
    /// Price overrides are clamped so the range sent is never inverted: a
    /// negative or non-numeric lower bound becomes `0` and the upper bound is
    /// raised to at least the lower one.
    pub fn build(&self) -> RequestDescriptor {
        let min_price = self.min_price.max(0.0);
        let max_price = self.max_price.max(min_price);
        RequestDescriptor {
            min_price,
            max_price,
            min_rating: self.min_rating,
            min_feedbacks: self.min_feedbacks,
        }
    }
}

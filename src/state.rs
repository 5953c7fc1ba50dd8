//! User-editable filter and sort state.
//!
//! Both types are mutated only through their setters, which report whether the
//! state actually changed so the caller knows when a new request is due.

use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{CatalogError, Result};
use crate::query_builder::{coerce_number, NumericInput};

// ---------------------------------------------------------------------------
// InvalidInputPolicy
// ---------------------------------------------------------------------------

/// What to do with text input that does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidInputPolicy {
    /// Store `NaN` and send it to the server, which decides what to do.
    #[default]
    Forward,
    /// Return [`CatalogError::InvalidArgument`] and keep the previous value.
    Reject,
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// Current filter values. `price_min <= price_max` holds at all times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    price_min: f64,
    price_max: f64,
    min_rating: f64,
    min_feedbacks: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            price_min: config::DEFAULT_PRICE_MIN,
            price_max: config::DEFAULT_PRICE_MAX,
            min_rating: config::DEFAULT_MIN_RATING,
            min_feedbacks: config::DEFAULT_MIN_FEEDBACKS,
        }
    }
}

impl FilterState {
    /// Create a filter state, rejecting a non-numeric or inverted price range.
    pub fn new(price_min: f64, price_max: f64, min_rating: f64, min_feedbacks: u64) -> Result<Self> {
        let mut state = Self {
            min_rating,
            min_feedbacks: min_feedbacks as f64,
            ..Self::default()
        };
        state.set_price_range(price_min, price_max)?;
        Ok(state)
    }

    pub fn price_min(&self) -> f64 {
        self.price_min
    }

    pub fn price_max(&self) -> f64 {
        self.price_max
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    pub fn min_feedbacks(&self) -> f64 {
        self.min_feedbacks
    }

    // -- Price bounds ------------------------------------------------------

    /// Set both price bounds at once.
    ///
    /// Negative bounds clamp to 0. An inverted range (`min > max`) or a
    /// non-finite bound is rejected and leaves the state untouched.
    pub fn set_price_range(&mut self, min: f64, max: f64) -> Result<bool> {
        let min = finite_price(min)?.max(0.0);
        let max = finite_price(max)?.max(0.0);
        if min > max {
            return Err(CatalogError::InvalidArgument(format!(
                "price range is inverted: {} > {}",
                min, max
            )));
        }
        let changed = !same(self.price_min, min) || !same(self.price_max, max);
        self.price_min = min;
        self.price_max = max;
        Ok(changed)
    }

    /// Set the lower price bound, clamped into `[0, price_max]`.
    pub fn set_price_min(&mut self, min: f64) -> Result<bool> {
        let min = finite_price(min)?.clamp(0.0, self.price_max);
        Ok(replace(&mut self.price_min, min))
    }

    /// Set the upper price bound, clamped to at least `price_min`.
    pub fn set_price_max(&mut self, max: f64) -> Result<bool> {
        let max = finite_price(max)?.max(self.price_min);
        Ok(replace(&mut self.price_max, max))
    }

    // -- Rating and feedbacks ----------------------------------------------

    /// Set the minimum rating. Values outside `[0, 5]` are passed through.
    pub fn set_min_rating(&mut self, rating: f64) -> bool {
        replace(&mut self.min_rating, rating)
    }

    /// Set the minimum rating from a text field.
    pub fn set_min_rating_text(&mut self, text: &str, policy: InvalidInputPolicy) -> Result<bool> {
        let value = resolve_text("min_rating", text, policy)?;
        Ok(replace(&mut self.min_rating, value))
    }

    pub fn set_min_feedbacks(&mut self, feedbacks: u64) -> bool {
        replace(&mut self.min_feedbacks, feedbacks as f64)
    }

    /// Set the minimum feedback count from a text field.
    ///
    /// Fractional input is kept as typed; the server decides how to treat it.
    pub fn set_min_feedbacks_text(&mut self, text: &str, policy: InvalidInputPolicy) -> Result<bool> {
        let value = resolve_text("min_feedbacks", text, policy)?;
        Ok(replace(&mut self.min_feedbacks, value))
    }
}

/// Bitwise equality, so a `NaN` that is set again does not count as a change.
fn same(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

fn replace(slot: &mut f64, value: f64) -> bool {
    let changed = !same(*slot, value);
    *slot = value;
    changed
}

fn finite_price(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CatalogError::InvalidArgument(format!(
            "price bound must be a finite number, got {}",
            value
        )))
    }
}

fn resolve_text(field: &str, text: &str, policy: InvalidInputPolicy) -> Result<f64> {
    match (coerce_number(text), policy) {
        (NumericInput::Value(v), _) => Ok(v),
        (NumericInput::Invalid(_), InvalidInputPolicy::Forward) => Ok(f64::NAN),
        (NumericInput::Invalid(raw), InvalidInputPolicy::Reject) => Err(
            CatalogError::InvalidArgument(format!("{} is not a number: {:?}", field, raw)),
        ),
    }
}

// ---------------------------------------------------------------------------
// SortField / SortDirection
// ---------------------------------------------------------------------------

/// Column the record table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// Keep the order the server returned.
    #[default]
    None,
    Name,
    #[serde(rename = "price_with_discount")]
    DiscountedPrice,
    Rating,
    Feedbacks,
}

impl SortField {
    /// Record field name this column sorts on, `None` for server order.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            SortField::None => None,
            SortField::Name => Some("name"),
            SortField::DiscountedPrice => Some("price_with_discount"),
            SortField::Rating => Some("rating"),
            SortField::Feedbacks => Some("feedbacks"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

// ---------------------------------------------------------------------------
// SortState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    field: SortField,
    direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn field(&self) -> SortField {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Whether `field` is the column currently sorted on.
    pub fn is_active(&self, field: SortField) -> bool {
        self.field != SortField::None && self.field == field
    }

    /// Apply a column-header click.
    ///
    /// Selecting the active field toggles direction; selecting any other field
    /// (including [`SortField::None`]) switches to it in ascending order.
    /// Returns whether the state changed.
    pub fn select(&mut self, field: SortField) -> bool {
        let next = if self.is_active(field) {
            Self::new(field, self.direction.toggled())
        } else {
            Self::new(field, SortDirection::Ascending)
        };
        let changed = next != *self;
        *self = next;
        changed
    }
}

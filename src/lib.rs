//! Product catalog SDK for Rust.
//!
//! Turns filter and sort state into listing requests, fetches products from
//! the catalog API, orders them on the client and derives two chart datasets:
//! a price histogram and a discount-vs-rating series.
//!
//! # Quick start
//!
//! ```no_run
//! use catalog_sdk::{Catalog, SortField};
//!
//! let mut catalog = Catalog::builder()
//!     .base_url("http://localhost:8000")
//!     .build()
//!     .unwrap();
//!
//! // Initial load
//! catalog.refresh();
//!
//! // Every change refetches and recomputes the view
//! catalog.set_price_range(0.0, 5000.0).unwrap();
//! catalog.select_sort(SortField::Rating);
//!
//! let view = catalog.view();
//! println!("{} products, {} bins", view.records.len(), view.histogram.len());
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod query_builder;
pub mod session;
pub mod source;
pub mod state;

#[cfg(feature = "async")]
pub use async_client::AsyncCatalog;
pub use error::{CatalogError, Result};
pub use models::{HistogramBin, ProductRecord, ScatterPoint};
pub use query_builder::{coerce_number, NumericInput, QueryBuilder, RequestDescriptor};
pub use session::{ApplyOutcome, CatalogSession, CatalogView, RequestTicket, ViewStatus};
pub use source::{HttpProductSource, ProductSource};
pub use state::{FilterState, InvalidInputPolicy, SortDirection, SortField, SortState};

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Catalog`].
///
/// Use [`Catalog::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CatalogBuilder::build) to create the catalog.
pub struct CatalogBuilder {
    base_url: Option<String>,
    timeout: Duration,
    filter: FilterState,
    policy: InvalidInputPolicy,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            filter: FilterState::default(),
            policy: InvalidInputPolicy::default(),
        }
    }
}

impl CatalogBuilder {
    /// Set the catalog API base URL.
    ///
    /// If not set, `CATALOG_API_URL` is read from the environment, falling
    /// back to `http://localhost:8000`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the filter state the catalog starts with.
    pub fn filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Choose how unparseable text input is handled. Defaults to
    /// [`InvalidInputPolicy::Forward`].
    pub fn invalid_input_policy(mut self, policy: InvalidInputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build a catalog backed by the HTTP listing endpoint.
    ///
    /// Does **not** fetch anything; call [`Catalog::refresh`] for the
    /// initial load.
    pub fn build(self) -> Result<Catalog<HttpProductSource>> {
        let base_url = self.base_url.clone().unwrap_or_else(config::default_base_url);
        let source = HttpProductSource::new(&base_url, self.timeout)?;
        Ok(self.build_with_source(source))
    }

    /// Build a catalog backed by a custom [`ProductSource`].
    pub fn build_with_source<S: ProductSource>(self, source: S) -> Catalog<S> {
        Catalog {
            session: CatalogSession::new(self.filter, self.policy),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Blocking catalog driver.
///
/// Each state change builds a request, fetches it from the source and applies
/// the response before returning. Fetch failures never surface as errors:
/// the previous records stay in place and [`ViewStatus::Stale`] is reported.
/// Only invalid state edits return `Err`.
pub struct Catalog<S: ProductSource = HttpProductSource> {
    session: CatalogSession,
    source: S,
}

impl Catalog<HttpProductSource> {
    /// Create a new builder for configuring the catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }
}

impl<S: ProductSource> Catalog<S> {
    fn dispatch(&mut self, ticket: Option<RequestTicket>) -> Option<ApplyOutcome> {
        let ticket = ticket?;
        let response = self.source.fetch(&ticket.descriptor);
        Some(self.session.apply_response(ticket.seq, response))
    }

    /// Re-issue the request for the current state.
    ///
    /// Call once after building to load the initial records.
    pub fn refresh(&mut self) -> ApplyOutcome {
        let ticket = self.session.request();
        let response = self.source.fetch(&ticket.descriptor);
        self.session.apply_response(ticket.seq, response)
    }

    // -- State changes -----------------------------------------------------

    /// Set both price bounds. Returns `None` when nothing changed.
    pub fn set_price_range(&mut self, min: f64, max: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.session.set_price_range(min, max)?;
        Ok(self.dispatch(ticket))
    }

    /// Set the lower price bound, clamped into `[0, price_max]`.
    pub fn set_price_min(&mut self, min: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.session.set_price_min(min)?;
        Ok(self.dispatch(ticket))
    }

    /// Set the upper price bound, clamped to at least the lower bound.
    pub fn set_price_max(&mut self, max: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.session.set_price_max(max)?;
        Ok(self.dispatch(ticket))
    }

    /// Set the minimum rating. Returns `None` when nothing changed.
    pub fn set_min_rating(&mut self, rating: f64) -> Option<ApplyOutcome> {
        let ticket = self.session.set_min_rating(rating);
        self.dispatch(ticket)
    }

    /// Set the minimum rating from raw text field input.
    pub fn set_min_rating_text(&mut self, text: &str) -> Result<Option<ApplyOutcome>> {
        let ticket = self.session.set_min_rating_text(text)?;
        Ok(self.dispatch(ticket))
    }

    /// Set the minimum feedback count. Returns `None` when nothing changed.
    pub fn set_min_feedbacks(&mut self, feedbacks: u64) -> Option<ApplyOutcome> {
        let ticket = self.session.set_min_feedbacks(feedbacks);
        self.dispatch(ticket)
    }

    /// Set the minimum feedback count from raw text field input.
    pub fn set_min_feedbacks_text(&mut self, text: &str) -> Result<Option<ApplyOutcome>> {
        let ticket = self.session.set_min_feedbacks_text(text)?;
        Ok(self.dispatch(ticket))
    }

    /// Apply a sort column click (toggle on the active field, otherwise
    /// switch to `field` ascending).
    pub fn select_sort(&mut self, field: SortField) -> Option<ApplyOutcome> {
        let ticket = self.session.select_sort(field);
        self.dispatch(ticket)
    }

    // -- Accessors ---------------------------------------------------------

    /// Records, histogram and scatter series derived from the current state.
    pub fn view(&self) -> CatalogView {
        self.session.view()
    }

    /// Current records in display order.
    pub fn records(&self) -> &[ProductRecord] {
        self.session.records()
    }

    /// Price histogram bounded by the current price maximum.
    pub fn histogram(&self) -> Vec<HistogramBin> {
        self.session.histogram()
    }

    /// Discount-vs-rating series in server order.
    pub fn scatter(&self) -> Vec<ScatterPoint> {
        self.session.scatter()
    }

    /// Freshness of the records currently held.
    pub fn status(&self) -> &ViewStatus {
        self.session.status()
    }

    /// Current filter state.
    pub fn filter(&self) -> &FilterState {
        self.session.filter()
    }

    /// Current sort state.
    pub fn sort(&self) -> &SortState {
        self.session.sort()
    }

    /// Return a reference to the underlying [`CatalogSession`].
    pub fn session(&self) -> &CatalogSession {
        &self.session
    }

    /// Return a reference to the product source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<S: ProductSource> fmt::Display for Catalog<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filter = self.session.filter();
        let sort = self.session.sort();
        write!(
            f,
            "Catalog(records={}, price=[{}, {}], min_rating={}, min_feedbacks={}, sort={})",
            self.session.records().len(),
            filter.price_min(),
            filter.price_max(),
            filter.min_rating(),
            filter.min_feedbacks(),
            match sort.field().as_str() {
                Some(name) => format!("{} {:?}", name, sort.direction()),
                None => "none".to_string(),
            }
        )
    }
}

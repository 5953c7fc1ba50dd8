//! Catalog session: filter/sort state, request sequencing and the current
//! record collection.
//!
//! The session performs no I/O. Every state change that needs fresh data
//! returns a [`RequestTicket`]; the driver fetches it and hands the outcome
//! back through [`CatalogSession::apply_response`]. Only the response to the
//! most recently issued ticket is ever applied, so a slow response can never
//! overwrite the result of a newer request.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{HistogramBin, ProductRecord, ScatterPoint};
use crate::pipeline;
use crate::query_builder::{QueryBuilder, RequestDescriptor};
use crate::state::{FilterState, InvalidInputPolicy, SortField, SortState};

// ---------------------------------------------------------------------------
// RequestTicket / ApplyOutcome / ViewStatus
// ---------------------------------------------------------------------------

/// A request descriptor tagged with its sequence number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestTicket {
    pub seq: u64,
    pub descriptor: RequestDescriptor,
}

/// What [`CatalogSession::apply_response`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The records replaced the current collection.
    Applied { records: usize },
    /// A newer request was issued after this one; the response was dropped.
    Superseded { seq: u64, latest: u64 },
    /// The latest request failed; the previous collection stays visible.
    Failed { reason: String },
}

/// Freshness of the collection currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewStatus {
    /// No response has been applied yet.
    #[default]
    NotLoaded,
    /// The collection answers the latest completed request.
    Fresh,
    /// The latest completed request failed; older data is shown.
    Stale { reason: String },
}

// ---------------------------------------------------------------------------
// CatalogView
// ---------------------------------------------------------------------------

/// Everything the presentation layer renders, derived in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    /// Records in display (sorted) order.
    pub records: Vec<ProductRecord>,
    pub histogram: Vec<HistogramBin>,
    /// Computed from the collection in server order.
    pub scatter: Vec<ScatterPoint>,
    pub status: ViewStatus,
    /// A request has been issued and not answered yet.
    pub pending: bool,
}

// ---------------------------------------------------------------------------
// CatalogSession
// ---------------------------------------------------------------------------

pub struct CatalogSession {
    filter: FilterState,
    sort: SortState,
    policy: InvalidInputPolicy,
    issued: u64,
    answered: u64,
    fetched: Arc<[ProductRecord]>,
    sorted: Arc<[ProductRecord]>,
    status: ViewStatus,
}

impl Default for CatalogSession {
    fn default() -> Self {
        Self::new(FilterState::default(), InvalidInputPolicy::default())
    }
}

impl CatalogSession {
    pub fn new(filter: FilterState, policy: InvalidInputPolicy) -> Self {
        Self {
            filter,
            sort: SortState::default(),
            policy,
            issued: 0,
            answered: 0,
            fetched: Arc::from(Vec::new()),
            sorted: Arc::from(Vec::new()),
            status: ViewStatus::NotLoaded,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn policy(&self) -> InvalidInputPolicy {
        self.policy
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Sequence number of the most recently issued request (0 before the first).
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Whether the latest issued request is still unanswered.
    pub fn is_pending(&self) -> bool {
        self.answered != self.issued
    }

    // -- Requests ----------------------------------------------------------

    /// Issue a request for the current filter state.
    ///
    /// Used for the initial load and for manual refreshes; state setters call
    /// it themselves when something changed.
    pub fn request(&mut self) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket {
            seq: self.issued,
            descriptor: QueryBuilder::new(&self.filter).build(),
        };
        debug!(seq = ticket.seq, params = ?ticket.descriptor, "issuing product request");
        ticket
    }

    fn request_if(&mut self, changed: bool) -> Option<RequestTicket> {
        if changed {
            Some(self.request())
        } else {
            None
        }
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) -> Result<Option<RequestTicket>> {
        let changed = self.filter.set_price_range(min, max)?;
        Ok(self.request_if(changed))
    }

    pub fn set_price_min(&mut self, min: f64) -> Result<Option<RequestTicket>> {
        let changed = self.filter.set_price_min(min)?;
        Ok(self.request_if(changed))
    }

    pub fn set_price_max(&mut self, max: f64) -> Result<Option<RequestTicket>> {
        let changed = self.filter.set_price_max(max)?;
        Ok(self.request_if(changed))
    }

    pub fn set_min_rating(&mut self, rating: f64) -> Option<RequestTicket> {
        let changed = self.filter.set_min_rating(rating);
        self.request_if(changed)
    }

    pub fn set_min_rating_text(&mut self, text: &str) -> Result<Option<RequestTicket>> {
        let changed = self.filter.set_min_rating_text(text, self.policy)?;
        Ok(self.request_if(changed))
    }

    pub fn set_min_feedbacks(&mut self, feedbacks: u64) -> Option<RequestTicket> {
        let changed = self.filter.set_min_feedbacks(feedbacks);
        self.request_if(changed)
    }

    pub fn set_min_feedbacks_text(&mut self, text: &str) -> Result<Option<RequestTicket>> {
        let changed = self.filter.set_min_feedbacks_text(text, self.policy)?;
        Ok(self.request_if(changed))
    }

    /// Apply a sort column click. Sorting changes also refetch.
    ///
    /// The current collection is reordered right away, so it matches the new
    /// sort even if the refetch fails.
    pub fn select_sort(&mut self, field: SortField) -> Option<RequestTicket> {
        let changed = self.sort.select(field);
        if changed {
            self.sorted = Arc::from(pipeline::sort_records(&self.fetched, &self.sort));
        }
        self.request_if(changed)
    }

    // -- Responses ---------------------------------------------------------

    /// Hand back the outcome of the request with sequence number `seq`.
    pub fn apply_response(&mut self, seq: u64, response: Result<Vec<ProductRecord>>) -> ApplyOutcome {
        if seq != self.issued {
            warn!(seq, latest = self.issued, "discarding superseded product response");
            return ApplyOutcome::Superseded {
                seq,
                latest: self.issued,
            };
        }
        self.answered = seq;

        match response {
            Ok(records) => {
                let count = records.len();
                let sorted = pipeline::sort_records(&records, &self.sort);
                self.fetched = Arc::from(records);
                self.sorted = Arc::from(sorted);
                self.status = ViewStatus::Fresh;
                info!(seq, records = count, "applied product response");
                ApplyOutcome::Applied { records: count }
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(seq, error = %reason, "error loading products; keeping previous data");
                self.status = ViewStatus::Stale {
                    reason: reason.clone(),
                };
                ApplyOutcome::Failed { reason }
            }
        }
    }

    // -- Derived data ------------------------------------------------------

    /// Current records in display order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.sorted
    }

    /// Current records in the order the server returned them.
    pub fn fetched_records(&self) -> &[ProductRecord] {
        &self.fetched
    }

    /// Histogram over the current records, bounded by the current price maximum.
    pub fn histogram(&self) -> Vec<HistogramBin> {
        pipeline::derive_histogram(&self.fetched, self.filter.price_max())
    }

    pub fn scatter(&self) -> Vec<ScatterPoint> {
        pipeline::derive_scatter(&self.fetched)
    }

    /// Derive the full view from the stored collection. Nothing is cached.
    pub fn view(&self) -> CatalogView {
        CatalogView {
            records: self.sorted.to_vec(),
            histogram: self.histogram(),
            scatter: self.scatter(),
            status: self.status.clone(),
            pending: self.is_pending(),
        }
    }
}

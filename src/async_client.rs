//! Async catalog driver for use in async runtimes (Tokio, etc.).
//!
//! Fetches run on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], so several state changes can have
//! requests in flight at once. The session is only locked to issue a ticket
//! and to apply a response, never across an await; request sequencing makes
//! sure an older response that arrives late is discarded.
//!
//! # Example
//!
//! ```no_run
//! use catalog_sdk::{AsyncCatalog, SortField};
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = AsyncCatalog::builder().build().await.unwrap();
//!     catalog.refresh().await.unwrap();
//!
//!     catalog.set_min_rating(4.5).await.unwrap();
//!     catalog.select_sort(SortField::Name).await.unwrap();
//!
//!     let view = catalog.view().unwrap();
//!     println!("{} products", view.records.len());
//!
//!     // Release the HTTP client off the async thread
//!     catalog.close().await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::config;
use crate::error::{CatalogError, Result};
use crate::session::{ApplyOutcome, CatalogSession, CatalogView, RequestTicket};
use crate::source::{HttpProductSource, ProductSource};
use crate::state::{FilterState, InvalidInputPolicy, SortField};

// ---------------------------------------------------------------------------
// AsyncCatalogBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCatalog`] instance.
pub struct AsyncCatalogBuilder {
    base_url: Option<String>,
    timeout: Duration,
    filter: FilterState,
    policy: InvalidInputPolicy,
}

impl Default for AsyncCatalogBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            filter: FilterState::default(),
            policy: InvalidInputPolicy::default(),
        }
    }
}

impl AsyncCatalogBuilder {
    /// Set the catalog API base URL.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the filter state the catalog starts with.
    pub fn filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    /// Choose how unparseable text input is handled.
    pub fn invalid_input_policy(mut self, policy: InvalidInputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the async catalog backed by the HTTP listing endpoint.
    ///
    /// The blocking HTTP client is created on the blocking thread pool so it
    /// won't block the async event loop.
    pub async fn build(self) -> Result<AsyncCatalog<HttpProductSource>> {
        let base_url = self.base_url.clone().unwrap_or_else(config::default_base_url);
        let timeout = self.timeout;
        let source = tokio::task::spawn_blocking(move || HttpProductSource::new(&base_url, timeout))
            .await
            .map_err(|e| CatalogError::Task(format!("Task join error: {e}")))??;
        Ok(self.build_with_source(source))
    }

    /// Build the async catalog backed by a custom [`ProductSource`].
    pub fn build_with_source<S>(self, source: S) -> AsyncCatalog<S>
    where
        S: ProductSource + Send + Sync + 'static,
    {
        AsyncCatalog {
            session: Arc::new(Mutex::new(CatalogSession::new(self.filter, self.policy))),
            source: Arc::new(source),
        }
    }
}

// ---------------------------------------------------------------------------
// AsyncCatalog
// ---------------------------------------------------------------------------

/// Async catalog driver.
///
/// Methods take `&self`, so overlapping state changes can be awaited
/// concurrently (e.g. with `tokio::join!`). Each returns the outcome of its
/// own request, which is [`ApplyOutcome::Superseded`] when a newer request
/// was issued in the meantime.
pub struct AsyncCatalog<S = HttpProductSource> {
    session: Arc<Mutex<CatalogSession>>,
    source: Arc<S>,
}

impl AsyncCatalog<HttpProductSource> {
    /// Create a new builder for configuring the async catalog.
    pub fn builder() -> AsyncCatalogBuilder {
        AsyncCatalogBuilder::default()
    }
}

impl<S> AsyncCatalog<S>
where
    S: ProductSource + Send + Sync + 'static,
{
    fn lock(&self) -> Result<MutexGuard<'_, CatalogSession>> {
        self.session
            .lock()
            .map_err(|_| CatalogError::Task("Catalog session lock poisoned".into()))
    }

    /// Issue a ticket while holding the lock, then release it before fetching.
    fn issue<F>(&self, f: F) -> Result<Option<RequestTicket>>
    where
        F: FnOnce(&mut CatalogSession) -> Result<Option<RequestTicket>>,
    {
        let mut guard = self.lock()?;
        f(&mut *guard)
    }

    async fn dispatch(&self, ticket: Option<RequestTicket>) -> Result<Option<ApplyOutcome>> {
        let Some(ticket) = ticket else {
            return Ok(None);
        };
        let source = self.source.clone();
        let descriptor = ticket.descriptor;
        let response = tokio::task::spawn_blocking(move || source.fetch(&descriptor))
            .await
            .map_err(|e| CatalogError::Task(format!("Task join error: {e}")))?;
        let outcome = self.lock()?.apply_response(ticket.seq, response);
        Ok(Some(outcome))
    }

    /// Re-issue the request for the current state.
    pub async fn refresh(&self) -> Result<ApplyOutcome> {
        let ticket = self.issue(|s| Ok(Some(s.request())))?;
        let outcome = self.dispatch(ticket).await?;
        outcome.ok_or_else(|| CatalogError::Task("refresh issued no request".into()))
    }

    /// Set both price bounds. Returns `None` when nothing changed.
    pub async fn set_price_range(&self, min: f64, max: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| s.set_price_range(min, max))?;
        self.dispatch(ticket).await
    }

    /// Set the lower price bound, clamped into `[0, price_max]`.
    pub async fn set_price_min(&self, min: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| s.set_price_min(min))?;
        self.dispatch(ticket).await
    }

    /// Set the upper price bound, clamped to at least the lower bound.
    pub async fn set_price_max(&self, max: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| s.set_price_max(max))?;
        self.dispatch(ticket).await
    }

    /// Set the minimum rating.
    pub async fn set_min_rating(&self, rating: f64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| Ok(s.set_min_rating(rating)))?;
        self.dispatch(ticket).await
    }

    /// Set the minimum rating from raw text field input.
    pub async fn set_min_rating_text(&self, text: &str) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| s.set_min_rating_text(text))?;
        self.dispatch(ticket).await
    }

    /// Set the minimum feedback count.
    pub async fn set_min_feedbacks(&self, feedbacks: u64) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| Ok(s.set_min_feedbacks(feedbacks)))?;
        self.dispatch(ticket).await
    }

    /// Set the minimum feedback count from raw text field input.
    pub async fn set_min_feedbacks_text(&self, text: &str) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| s.set_min_feedbacks_text(text))?;
        self.dispatch(ticket).await
    }

    /// Apply a sort column click.
    pub async fn select_sort(&self, field: SortField) -> Result<Option<ApplyOutcome>> {
        let ticket = self.issue(|s| Ok(s.select_sort(field)))?;
        self.dispatch(ticket).await
    }

    /// Derive the current view.
    pub fn view(&self) -> Result<CatalogView> {
        Ok(self.lock()?.view())
    }

    /// Run a read-only closure against the session.
    pub fn inspect<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CatalogSession) -> T,
    {
        let guard = self.lock()?;
        Ok(f(&*guard))
    }

    /// Close the catalog, dropping the source on the blocking thread pool.
    ///
    /// The blocking HTTP client must not be dropped on an async worker
    /// thread, so prefer this over a plain drop inside a runtime.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self))
            .await
            .map_err(|e| CatalogError::Task(format!("Task join error: {e}")))
    }
}

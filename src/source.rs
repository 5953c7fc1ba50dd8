//! Product listing sources.
//!
//! [`ProductSource`] is the seam between the catalog and the network. The
//! HTTP implementation talks to the listing endpoint with a blocking reqwest
//! client; tests and embedders can plug in anything else.

use std::time::Duration;

use reqwest::blocking::{Client, Request};
use tracing::debug;

use crate::config;
use crate::error::{CatalogError, Result};
use crate::models::ProductRecord;
use crate::query_builder::RequestDescriptor;

/// Fetches the records matching a request descriptor.
pub trait ProductSource {
    fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<ProductRecord>>;
}

impl<S: ProductSource + ?Sized> ProductSource for std::sync::Arc<S> {
    fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<ProductRecord>> {
        (**self).fetch(request)
    }
}

// ---------------------------------------------------------------------------
// HttpProductSource
// ---------------------------------------------------------------------------

/// Fetches records from `GET {base_url}/api/products/`.
pub struct HttpProductSource {
    base_url: String,
    client: Client,
}

impl HttpProductSource {
    /// Create a source for the given API base URL.
    ///
    /// A trailing slash on `base_url` is ignored. `timeout` bounds each
    /// request; a request that times out is reported as an HTTP error.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the listing endpoint, without query parameters.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, config::PRODUCTS_PATH)
    }

    /// Build (but do not send) the request for a descriptor.
    pub fn build_request(&self, request: &RequestDescriptor) -> Result<Request> {
        let req = self
            .client
            .get(self.endpoint())
            .query(&request.query_pairs())
            .build()?;
        Ok(req)
    }
}

impl ProductSource for HttpProductSource {
    fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<ProductRecord>> {
        let req = self.build_request(request)?;
        let url = req.url().to_string();
        debug!(%url, "fetching products");

        let resp = self.client.execute(req)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text()?;
        let records: Vec<ProductRecord> = serde_json::from_str(&body)?;
        Ok(records)
    }
}

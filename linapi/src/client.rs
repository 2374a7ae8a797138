//! # Linode Client
//!
//! This module implements the single dynamic entry point every remote operation goes
//! through.
//!
//! The [`LinodeClient`] holds the method [`Catalog`], a [`Transport`] and the session state
//! (credential, response format, batching flag and the [`BatchCache`]). A call is:
//!
//! 1. **Resolved**: the symbolic name is looked up in the catalog and the arguments are
//!    reconciled with the method's parameters, see [`crate::call`].
//! 2. **Dispatched**: with batching off the request is posted right away and the decoded
//!    response is returned. With batching on the call is queued until [`LinodeClient::flush`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use linapi::client::LinodeClient;
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = LinodeClient::new("my-api-key", false)?;
//! let domains = client.invoke("domain_list", json!(null)).await?;
//!
//! let mut batch = LinodeClient::new("my-api-key", true)?;
//! batch.invoke("linode.boot", json!([1234])).await?;
//! batch.invoke("linode.boot", json!({ "LinodeID": 5678, "ConfigID": 9 })).await?;
//! let results = batch.flush().await?;
//! # Ok(())
//! # }
//! ```
mod dispatch;
mod types;

pub use types::*;

use crate::{
    batch::BatchCache,
    catalog::{Catalog, CatalogError, MethodSpec},
    config::ClientConfig,
    decode::ResponseFormat,
    transport::{HttpTransport, Transport, TransportError},
};
use std::fmt;

/// Errors that can occur when building a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("An API key is required")]
    MissingApiKey,
    #[error("Failed to load the method catalog: '{0}'")]
    Catalog(#[from] CatalogError),
    #[error("Failed to set up the transport: '{0}'")]
    Transport(#[from] TransportError),
}

/// A dynamic client for the Linode action API.
///
/// The generic parameter `T` is the [`Transport`] requests are posted through.
#[derive(Debug)]
pub struct LinodeClient<T = HttpTransport> {
    catalog: Catalog,
    transport: T,
    session: Session,
}

struct Session {
    api_key: String,
    response_format: ResponseFormat,
    batching: bool,
    batch: BatchCache,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("api_key", &"<redacted>")
            .field("response_format", &self.response_format)
            .field("batching", &self.batching)
            .field("batch", &self.batch)
            .finish()
    }
}

impl LinodeClient<HttpTransport> {
    /// Creates a client for the public API with the default configuration and the bundled
    /// catalog.
    ///
    /// # Arguments
    ///
    /// * `api_key` - The Linode API key sent with every request.
    /// * `batching` - Whether calls are queued until [`LinodeClient::flush`] instead of sent.
    ///
    /// # Returns
    ///
    /// * `Ok(LinodeClient)` - The client.
    /// * `Err(ClientBuildError)` - If the key is blank, or the catalog or HTTP client can't be set up.
    pub fn new(api_key: impl Into<String>, batching: bool) -> Result<Self, ClientBuildError> {
        Self::with_config(api_key, batching, ClientConfig::default())
    }

    /// Creates a client posting through an [`HttpTransport`] built from `config`.
    pub fn with_config(
        api_key: impl Into<String>,
        batching: bool,
        config: ClientConfig,
    ) -> Result<Self, ClientBuildError> {
        let api_key = require_api_key(api_key.into())?;
        let catalog = Catalog::builtin()?;
        let transport = HttpTransport::new(&config)?;

        Ok(Self::from_parts(api_key, batching, catalog, transport)
            .with_response_format(config.response_format))
    }
}

impl<T> LinodeClient<T>
where
    T: Transport,
{
    /// Creates a client from an explicit catalog and an existing transport.
    pub fn from_transport(
        api_key: impl Into<String>,
        batching: bool,
        catalog: Catalog,
        transport: T,
    ) -> Result<Self, ClientBuildError> {
        let api_key = require_api_key(api_key.into())?;
        Ok(Self::from_parts(api_key, batching, catalog, transport))
    }
}

impl<T> LinodeClient<T> {
    fn from_parts(api_key: String, batching: bool, catalog: Catalog, transport: T) -> Self {
        tracing::debug!(methods = catalog.len(), batching, "client created");

        Self {
            catalog,
            transport,
            session: Session {
                api_key,
                response_format: ResponseFormat::default(),
                batching,
                batch: BatchCache::new(),
            },
        }
    }

    /// Selects the format requested in `api_responseFormat` and used to decode responses.
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.session.response_format = format;
        self
    }

    pub fn response_format(&self) -> ResponseFormat {
        self.session.response_format
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Looks up the declaration of a symbolic method name without calling it.
    pub fn describe(&self, method: &str) -> Option<&MethodSpec> {
        self.catalog.lookup(method)
    }

    pub fn is_batching(&self) -> bool {
        self.session.batching
    }

    /// Turns batching on or off. Calls already queued stay queued until the next flush.
    pub fn set_batching(&mut self, batching: bool) {
        self.session.batching = batching;
    }

    /// Number of calls waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.session.batch.len()
    }

    /// The calls waiting for the next flush, in the order they were queued.
    pub fn batch(&self) -> &BatchCache {
        &self.session.batch
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn require_api_key(api_key: String) -> Result<String, ClientBuildError> {
    if api_key.trim().is_empty() {
        return Err(ClientBuildError::MissingApiKey);
    }
    Ok(api_key)
}

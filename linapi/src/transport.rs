//! # Transport
//!
//! The transport performs one HTTP POST of flat, string-valued form fields and hands back
//! the raw response body. It knows nothing about methods, catalogs or batching.
//!
//! [`HttpTransport`] is the `reqwest` implementation used by default. Anything else
//! implementing [`Transport`] (an in-process fake, a proxy, a recorder) can be plugged into
//! [`LinodeClient::from_transport`](crate::client::LinodeClient::from_transport).
pub mod http;

pub use http::HttpTransport;

use std::future::Future;

/// A list of `(field, value)` pairs posted as one form.
pub type FormFields = Vec<(String, String)>;

/// Errors reported by a [`Transport`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build the HTTP client: '{0}'")]
    Build(#[source] reqwest::Error),
    #[error("Request to '{url}' failed: '{source}'")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    #[error("Server responded with status {status}: '{message}'")]
    Status { status: u16, message: String },
    #[error("Server returned an empty response body")]
    EmptyBody,
}

impl TransportError {
    /// The provider status code of the failure, when there is one.
    pub fn code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request { source, .. } => source.status().map(|s| s.as_u16()),
            TransportError::Build(_) | TransportError::EmptyBody => None,
        }
    }
}

/// Executes a single form POST against the API.
pub trait Transport {
    /// Posts `fields` and returns the raw response body.
    fn post(
        &mut self,
        fields: FormFields,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

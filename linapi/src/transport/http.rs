//! # HTTP Transport
//!
//! A [`Transport`] backed by `reqwest`. Requests are form-encoded POSTs to a single
//! endpoint, TLS peer verification is always on, and the connection can be pinned to IPv4.
use super::{FormFields, Transport, TransportError};
use crate::config::ClientConfig;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from the connection options of `config`.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpTransport)` - The transport, ready to post to `config.endpoint`.
    /// * `Err(TransportError::Build)` - If the TLS backend or client could not be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());

        if config.ipv4_only {
            builder = builder.local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        }
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(TransportError::Build)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn post(&mut self, fields: FormFields) -> Result<String, TransportError> {
        let request_error = |source| TransportError::Request {
            url: self.endpoint.clone(),
            source,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .form(&fields)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        tracing::trace!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        if body.is_empty() {
            return Err(TransportError::EmptyBody);
        }

        Ok(body)
    }
}

//! # linapi
//!
//! `linapi` is a schema-driven client for the Linode action API. Instead of one hand-written
//! function per remote operation, it loads a declarative method catalog and exposes a single
//! dynamic invocation path that turns any catalog entry into a validated request.
//!
//! ## Key Components
//!
//! * **[`LinodeClient`]:** The main entry point. It resolves symbolic method names against
//!   the catalog, validates the arguments and either posts the request right away or queues
//!   it for a batch.
//! * **[`Catalog`]:** The immutable table of methods and their parameter contracts, decoded
//!   once from a JSON document. A Linode catalog is bundled with the crate.
//! * **[`CallArgs`]:** Positional or named arguments of a symbolic call, convertible from
//!   `serde_json::Value`.
//!
//! ## Internals
//!
//! * **[`call`]:** Argument resolution and per-parameter type validation.
//! * **[`batch`]:** The ordered cache of queued calls flushed as one `batch` request.
//! * **[`request`]:** Construction of the flat field list posted for each request.
//! * **[`decode`]:** Response decoding, selected by the configured [`ResponseFormat`].
//! * **[`transport`]:** The [`Transport`] trait and its `reqwest` implementation.
//!
//! See the README.md for more details about usage.
pub mod batch;
pub mod call;
pub mod catalog;
pub mod client;
pub mod config;
pub mod decode;
pub mod request;
pub mod transport;

pub use call::{CallArgs, ResolvedCall};
pub use catalog::{Catalog, MethodSpec, ParamSpec, ParamType};
pub use client::{CallOutcome, DynamicCallError, LinodeClient};
pub use config::ClientConfig;
pub use decode::ResponseFormat;
pub use transport::{HttpTransport, Transport, TransportError};

// Re-exports
pub use serde_json;

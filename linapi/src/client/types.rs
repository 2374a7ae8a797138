use crate::{
    call::{ArgumentError, ResolveError, TypeError},
    decode::DecodeError,
    transport::TransportError,
};
use serde_json::Value;

/// What happened to a dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// The call was sent and the decoded response came back.
    Response(Value),
    /// Batching is on, the call was queued at `position` in the pending batch.
    Queued { position: usize },
}

impl CallOutcome {
    /// Returns the decoded response, or `None` if the call was queued.
    pub fn into_response(self) -> Option<Value> {
        match self {
            CallOutcome::Response(value) => Some(value),
            CallOutcome::Queued { .. } => None,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, CallOutcome::Queued { .. })
    }
}

/// Errors that can occur while invoking a method or flushing a batch.
#[derive(Debug, thiserror::Error)]
pub enum DynamicCallError {
    #[error("Unknown method: '{0}'")]
    UnknownMethod(String),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("Transport error: '{0}'")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Failed to encode the batch request array: '{0}'")]
    BatchEncode(#[source] serde_json::Error),
}

impl From<ResolveError> for DynamicCallError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Argument(err) => DynamicCallError::Argument(err),
            ResolveError::Type(err) => DynamicCallError::Type(err),
        }
    }
}

//! # Dispatch
//!
//! Invocation and batch flushing for a [`LinodeClient`] with a working [`Transport`].
use super::{CallOutcome, DynamicCallError, LinodeClient};
use crate::{
    call::{CallArgs, resolve},
    catalog::normalize_method_name,
    decode::decode,
    request::{ApiRequest, BATCH_ACTION, REQUEST_ARRAY_FIELD},
    transport::Transport,
};
use serde_json::Value;

impl<T> LinodeClient<T>
where
    T: Transport,
{
    /// Invokes a catalog method by its symbolic name.
    ///
    /// The name is matched case-insensitively, with `_` standing for `.` (`Domain_List` is
    /// `domain.list`). `args` may be positional (a `Vec`/JSON array), named (a JSON object)
    /// or empty (`CallArgs::none()` or JSON `null`).
    ///
    /// Arguments are resolved and validated before any network activity.
    ///
    /// # Returns
    ///
    /// * `Ok(CallOutcome::Response)` - Batching is off, the decoded API response.
    /// * `Ok(CallOutcome::Queued)` - Batching is on, the call waits for [`LinodeClient::flush`].
    /// * `Err(DynamicCallError)` - Unknown method, bad arguments, transport or decode failure.
    pub async fn invoke(
        &mut self,
        method: &str,
        args: impl Into<CallArgs>,
    ) -> Result<CallOutcome, DynamicCallError> {
        let spec = self
            .catalog
            .lookup(method)
            .ok_or_else(|| DynamicCallError::UnknownMethod(normalize_method_name(method)))?;

        let call = resolve(spec, args.into())?;

        if self.session.batching {
            let position = self.session.batch.push(call);
            tracing::debug!(position, "call queued");
            return Ok(CallOutcome::Queued { position });
        }

        tracing::debug!(method = %call.method, params = call.params.len(), "dispatching call");

        let request = ApiRequest::new(
            &self.session.api_key,
            self.session.response_format,
            &call.method,
        )
        .with_params(&call.params);

        let body = self.post(request).await?;
        let value = decode(&body, self.session.response_format)?;

        Ok(CallOutcome::Response(value))
    }

    /// Sends every queued call as one `batch` request and clears the queue.
    ///
    /// Flushing an empty queue is legal and sends an empty request array. When the transport
    /// fails the queue is left untouched so the flush can be attempted again. Once a response
    /// body has been received the queue is cleared, even if the body fails to decode.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The decoded batch response, one result per queued call.
    /// * `Err(DynamicCallError)` - If the request array can't be encoded, or the transport or decoding fails.
    pub async fn flush(&mut self) -> Result<Value, DynamicCallError> {
        let request_array = self
            .session
            .batch
            .request_array()
            .map_err(DynamicCallError::BatchEncode)?;

        tracing::debug!(calls = self.session.batch.len(), "flushing batch");

        let request = ApiRequest::new(
            &self.session.api_key,
            self.session.response_format,
            BATCH_ACTION,
        )
        .with_field(REQUEST_ARRAY_FIELD, request_array);

        let body = self.post(request).await?;
        self.session.batch.clear();

        Ok(decode(&body, self.session.response_format)?)
    }

    async fn post(&mut self, request: ApiRequest) -> Result<String, DynamicCallError> {
        let action = request.action().unwrap_or_default().to_string();

        match self.transport.post(request.into_fields()).await {
            Ok(body) => {
                tracing::trace!(%action, %body, "raw response");
                Ok(body)
            }
            Err(err) => {
                tracing::warn!(%action, code = ?err.code(), error = %err, "transport failure");
                Err(err.into())
            }
        }
    }
}

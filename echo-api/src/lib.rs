//! # Echo API
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide a method catalog and an
//! in-process transport for integration testing `linapi`.
//! It is not intended for production use.
//!
//! [`EchoTransport`] records every form it is asked to post and answers like the real API
//! would, echoing the call back in the `DATA` section of the response. Batch requests are
//! answered with one echo per entry of `api_requestArray`.
use linapi::request::{ACTION_FIELD, API_KEY_FIELD, BATCH_ACTION, REQUEST_ARRAY_FIELD};
use linapi::transport::{FormFields, Transport, TransportError};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};

/// A small catalog exercising every parameter type and required-ness combination.
pub const CATALOG: &str = r#"{
  "methods": [
    { "name": "domain.list", "params": [] },
    {
      "name": "domain.create",
      "params": [
        { "name": "domain", "type": "string", "required": true },
        { "name": "type", "type": "string", "required": true },
        { "name": "ttl_sec", "type": "integer", "required": false }
      ]
    },
    {
      "name": "domain.resource.update",
      "params": [
        { "name": "DomainID", "type": "integer", "required": false },
        { "name": "ResourceID", "type": "integer", "required": true },
        { "name": "Target", "type": "string", "required": false }
      ]
    },
    {
      "name": "linode.update",
      "params": [
        { "name": "LinodeID", "type": "integer", "required": "1" },
        { "name": "watchdog", "type": "boolean", "required": "0" },
        { "name": "Label", "type": "string" }
      ]
    },
    {
      "name": "linode.config.create",
      "params": [
        { "name": "LinodeID", "type": "integer", "required": true },
        { "name": "DiskList", "type": "list", "required": false }
      ]
    }
  ]
}"#;

/// An in-process [`Transport`] that echoes requests back as API responses.
#[derive(Debug, Clone, Default)]
pub struct EchoTransport {
    requests: Arc<Mutex<Vec<FormFields>>>,
    failure: Option<(u16, String)>,
}

impl EchoTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every post fails with the given HTTP status.
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            requests: Arc::default(),
            failure: Some((status, message.to_string())),
        }
    }

    /// A handle onto the requests posted so far, usable after the transport was moved into a
    /// client.
    pub fn recorder(&self) -> Recorder {
        Recorder(self.requests.clone())
    }
}

impl Transport for EchoTransport {
    async fn post(&mut self, fields: FormFields) -> Result<String, TransportError> {
        self.requests
            .lock()
            .expect("recorder lock poisoned")
            .push(fields.clone());

        if let Some((status, message)) = &self.failure {
            return Err(TransportError::Status {
                status: *status,
                message: message.clone(),
            });
        }

        let fields: Map<String, Value> = fields
            .into_iter()
            .filter(|(name, _)| name != API_KEY_FIELD)
            .map(|(name, value)| (name, Value::String(value)))
            .collect();

        let action = fields
            .get(ACTION_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let response = if action == BATCH_ACTION {
            let entries: Vec<Map<String, Value>> = fields
                .get(REQUEST_ARRAY_FIELD)
                .and_then(Value::as_str)
                .map(|array| serde_json::from_str(array).expect("invalid api_requestArray"))
                .unwrap_or_default();

            Value::Array(
                entries
                    .into_iter()
                    .map(|mut entry| {
                        let action = entry.remove(ACTION_FIELD).unwrap_or(Value::Null);
                        echo(action, Value::Object(entry))
                    })
                    .collect(),
            )
        } else {
            let mut data = fields;
            data.remove(ACTION_FIELD);
            echo(Value::String(action), Value::Object(data))
        };

        Ok(response.to_string())
    }
}

fn echo(action: Value, data: Value) -> Value {
    json!({ "ERRORARRAY": [], "ACTION": action, "DATA": data })
}

/// Shared view of the requests an [`EchoTransport`] received.
#[derive(Debug, Clone)]
pub struct Recorder(Arc<Mutex<Vec<FormFields>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<FormFields> {
        self.0.lock().expect("recorder lock poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().expect("recorder lock poisoned").len()
    }

    /// The fields of the last request as a name → value map.
    pub fn last(&self) -> Option<Map<String, Value>> {
        self.requests().pop().map(|fields| {
            fields
                .into_iter()
                .map(|(name, value)| (name, Value::String(value)))
                .collect()
        })
    }
}

/// Installs a test-friendly `tracing` subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

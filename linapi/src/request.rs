//! # Request Construction
//!
//! An [`ApiRequest`] is the flat field list of one physical request: the control fields
//! (`api_key`, `api_responseFormat`, `api_action`) followed by the call parameters. A new
//! value is built for every dispatch, nothing is carried over from one request to the next.
use crate::decode::ResponseFormat;
use crate::transport::FormFields;
use serde_json::{Map, Value};

pub const API_KEY_FIELD: &str = "api_key";
pub const RESPONSE_FORMAT_FIELD: &str = "api_responseFormat";
pub const ACTION_FIELD: &str = "api_action";
pub const REQUEST_ARRAY_FIELD: &str = "api_requestArray";

/// Action of the aggregate request sent by a batch flush.
pub const BATCH_ACTION: &str = "batch";

const CONTROL_FIELDS: [&str; 4] = [
    API_KEY_FIELD,
    RESPONSE_FORMAT_FIELD,
    ACTION_FIELD,
    REQUEST_ARRAY_FIELD,
];

#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    fields: FormFields,
}

impl ApiRequest {
    /// Starts a request carrying the control fields.
    pub fn new(api_key: &str, format: ResponseFormat, action: &str) -> Self {
        Self {
            fields: vec![
                (API_KEY_FIELD.to_string(), api_key.to_string()),
                (RESPONSE_FORMAT_FIELD.to_string(), format.as_str().to_string()),
                (ACTION_FIELD.to_string(), action.to_string()),
            ],
        }
    }

    /// Appends resolved call parameters. Parameters named like a control field are dropped.
    pub fn with_params(mut self, params: &Map<String, Value>) -> Self {
        for (name, value) in params {
            if CONTROL_FIELDS.contains(&name.as_str()) {
                tracing::warn!(param = %name, "parameter shadows a control field, dropping it");
                continue;
            }
            self.fields.push((name.clone(), wire_value(value)));
        }
        self
    }

    pub fn with_field(mut self, name: &str, value: String) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }

    /// The value of `name`, if the request carries it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn action(&self) -> Option<&str> {
        self.field(ACTION_FIELD)
    }

    pub fn into_fields(self) -> FormFields {
        self.fields
    }
}

// Keeps the credential out of logs and panic messages.
impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(name, value)| match name.as_str() {
                API_KEY_FIELD => (name.as_str(), "<redacted>"),
                _ => (name.as_str(), value.as_str()),
            })
            .collect();

        f.debug_struct("ApiRequest").field("fields", &fields).finish()
    }
}

/// Renders a parameter value as a form field value.
fn wire_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_fields() {
        let Value::Object(params) = json!({ "DomainID": 12, "Name": "www", "isPublic": "true" })
        else {
            unreachable!()
        };

        let request = ApiRequest::new("secret", ResponseFormat::Json, "domain.resource.create")
            .with_params(&params);

        assert_eq!(
            request.into_fields(),
            vec![
                ("api_key".to_string(), "secret".to_string()),
                ("api_responseFormat".to_string(), "json".to_string()),
                ("api_action".to_string(), "domain.resource.create".to_string()),
                ("DomainID".to_string(), "12".to_string()),
                ("Name".to_string(), "www".to_string()),
                ("isPublic".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_params_cannot_override_control_fields() {
        let Value::Object(params) = json!({ "api_action": "linode.delete", "LinodeID": 1 }) else {
            unreachable!()
        };

        let request = ApiRequest::new("secret", ResponseFormat::Json, "linode.boot")
            .with_params(&params);

        assert_eq!(request.action(), Some("linode.boot"));
        assert_eq!(request.field("LinodeID"), Some("1"));
        assert_eq!(request.into_fields().len(), 4);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let request = ApiRequest::new("secret", ResponseFormat::Json, "test.echo");

        let debug = format!("{request:?}");

        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}

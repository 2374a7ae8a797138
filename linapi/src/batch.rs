//! # Batch Cache
//!
//! When batching is enabled, resolved calls are not sent one by one. Each call's parameters
//! (tagged with its `api_action`) are appended here and later sent as a single `batch`
//! request whose `api_requestArray` field holds the whole cache as a JSON array.
use crate::call::ResolvedCall;
use crate::request::ACTION_FIELD;
use serde_json::{Map, Value};

/// Ordered, append-only buffer of queued calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchCache {
    entries: Vec<Map<String, Value>>,
}

impl BatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a resolved call and returns its position in the batch.
    pub fn push(&mut self, call: ResolvedCall) -> usize {
        let mut entry = call.params;
        entry.insert(ACTION_FIELD.to_string(), Value::String(call.method));
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the queued entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.entries.iter()
    }

    /// Serializes the queued entries, in order, as the JSON array sent in `api_requestArray`.
    pub fn request_array(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(method: &str, params: Value) -> ResolvedCall {
        let Value::Object(params) = params else {
            panic!("params must be an object");
        };
        ResolvedCall {
            method: method.to_string(),
            params,
        }
    }

    #[test]
    fn test_push_preserves_order_and_tags_action() {
        let mut cache = BatchCache::new();

        assert_eq!(cache.push(call("linode.boot", json!({ "LinodeID": 1 }))), 0);
        assert_eq!(cache.push(call("domain.list", json!({}))), 1);

        let actions: Vec<&Value> = cache.iter().map(|e| &e[ACTION_FIELD]).collect();
        assert_eq!(actions, vec![&json!("linode.boot"), &json!("domain.list")]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_request_array() {
        let mut cache = BatchCache::new();
        assert_eq!(cache.request_array().unwrap(), "[]");

        cache.push(call("linode.boot", json!({ "LinodeID": 1 })));
        let array: Value = serde_json::from_str(&cache.request_array().unwrap()).unwrap();
        assert_eq!(
            array,
            json!([{ "LinodeID": 1, "api_action": "linode.boot" }])
        );

        cache.clear();
        assert!(cache.is_empty());
    }
}

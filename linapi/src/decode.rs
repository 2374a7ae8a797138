//! # Response Decoding
//!
//! The API answers in the format requested through `api_responseFormat`. Only JSON is
//! decoded into structured data; the other formats are handed back verbatim as a string.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Formats the API can answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Wddx,
    Human,
}

impl ResponseFormat {
    /// The value sent in the `api_responseFormat` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Wddx => "wddx",
            ResponseFormat::Human => "human",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown response format '{0}', expected one of json, wddx, human")]
pub struct UnknownFormat(pub String);

impl FromStr for ResponseFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ResponseFormat::Json),
            "wddx" => Ok(ResponseFormat::Wddx),
            "human" => Ok(ResponseFormat::Human),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// The raw response body could not be turned into structured data.
#[derive(Debug, thiserror::Error)]
#[error("Failed to decode {format} response: '{source}'")]
pub struct DecodeError {
    pub format: ResponseFormat,
    #[source]
    pub source: serde_json::Error,
}

/// Decodes a raw response body according to `format`.
pub fn decode(body: &str, format: ResponseFormat) -> Result<Value, DecodeError> {
    match format {
        ResponseFormat::Json => {
            serde_json::from_str(body).map_err(|source| DecodeError { format, source })
        }
        ResponseFormat::Wddx | ResponseFormat::Human => Ok(Value::String(body.to_string())),
    }
}

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::fmt;

/// The declaration of one remote method: its canonical name and its ordered parameters.
///
/// The order of `params` is significant, it is the order in which positional
/// arguments are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    /// Canonical, lowercase, dot-separated name (e.g., `domain.resource.list`).
    pub name: String,
    /// Declared parameters in positional order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl MethodSpec {
    /// Number of parameters declared as required.
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| p.required).count()
    }

    /// Returns the declaration of the parameter called `name`, if any.
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// The declaration of a single method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    /// A missing `type` declares nothing, the parameter is passed through unchecked.
    #[serde(rename = "type", default)]
    pub kind: ParamType,
    #[serde(default, deserialize_with = "deserialize_required")]
    pub required: bool,
}

/// The declared type of a parameter.
///
/// Catalogs may declare types the validator knows nothing about, those are kept
/// verbatim in [`ParamType::Other`] and accepted unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParamType {
    Boolean,
    Integer,
    String,
    Other(String),
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::Boolean => "boolean",
            ParamType::Integer => "integer",
            ParamType::String => "string",
            ParamType::Other(other) => other,
        }
    }
}

impl Default for ParamType {
    fn default() -> Self {
        ParamType::Other(String::new())
    }
}

impl From<String> for ParamType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "boolean" => ParamType::Boolean,
            "integer" => ParamType::Integer,
            "string" => ParamType::String,
            _ => ParamType::Other(value),
        }
    }
}

impl From<ParamType> for String {
    fn from(value: ParamType) -> Self {
        match value {
            ParamType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Catalog documents spell required-ness as a boolean, as `0`/`1`, or as the
// strings "true", "false", "1" and "0".
fn deserialize_required<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(u64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(flag) => Ok(flag),
        Flag::Int(0) => Ok(false),
        Flag::Int(1) => Ok(true),
        Flag::Int(other) => Err(D::Error::custom(format!(
            "invalid required flag '{other}', expected true/false or 1/0"
        ))),
        Flag::Text(text) => match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!(
                "invalid required flag '{other}', expected true/false or 1/0"
            ))),
        },
    }
}

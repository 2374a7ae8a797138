//! # Call Resolution
//!
//! Turns the arguments of a symbolic call into the validated, named parameter mapping that
//! is sent to the API (or queued in a batch).
//!
//! * [`resolver`]: reconciles positional or named arguments with a [`MethodSpec`]'s
//!   parameter list.
//! * [`validator`]: checks each consumed value against its declared [`ParamType`].
//!
//! [`MethodSpec`]: crate::catalog::MethodSpec
//! [`ParamType`]: crate::catalog::ParamType
pub mod resolver;
pub mod validator;

pub use resolver::{ArgumentError, ResolveError, resolve};
pub use validator::{TypeError, validate};

use serde_json::{Map, Value};

/// The arguments of one symbolic call, in the shape the caller supplied them.
#[derive(Debug, Clone, PartialEq)]
pub enum CallArgs {
    /// An ordered list of values, assigned to parameters in declaration order.
    Positional(Vec<Value>),
    /// A single mapping from parameter name to value.
    Named(Map<String, Value>),
}

impl CallArgs {
    /// A call without arguments.
    pub fn none() -> Self {
        CallArgs::Positional(Vec::new())
    }

    /// Number of supplied values (positional) or keys (named).
    pub fn len(&self) -> usize {
        match self {
            CallArgs::Positional(values) => values.len(),
            CallArgs::Named(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CallArgs {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        CallArgs::Positional(values)
    }
}

impl From<Map<String, Value>> for CallArgs {
    fn from(map: Map<String, Value>) -> Self {
        CallArgs::Named(map)
    }
}

/// Objects become named arguments, arrays positional ones, `null` means no arguments and
/// any other value is a single positional argument.
impl From<Value> for CallArgs {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => CallArgs::Named(map),
            Value::Array(values) => CallArgs::Positional(values),
            Value::Null => CallArgs::none(),
            scalar => CallArgs::Positional(vec![scalar]),
        }
    }
}

/// The validated, named-parameter form of one call, ready to be sent or queued.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    /// Canonical name of the resolved method, used as the request action.
    pub method: String,
    /// Validated values keyed by parameter name, in declaration order.
    pub params: Map<String, Value>,
}

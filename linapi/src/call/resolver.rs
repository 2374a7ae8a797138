//! # Argument Resolver
//!
//! Reconciles the arguments of a symbolic call with the parameter list of a [`MethodSpec`].
//!
//! ## Algorithm
//!
//! 1. Count the required parameters `R`. A call supplying fewer than `R` values (or a named
//!    mapping with fewer than `R` keys) is rejected up front.
//! 2. Walk the parameters in declaration order with a counter of required parameters still
//!    to fill, starting at `R`. While that counter is above zero, every parameter (required
//!    or not) takes the next positional value. Named arguments are always looked up by key.
//! 3. A parameter without a value is skipped, unless it is required.
//! 4. Every consumed value goes through [`validate`].
use super::{CallArgs, ResolvedCall, validator::TypeError, validate};
use crate::catalog::MethodSpec;
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// The supplied arguments cannot satisfy the parameter contract of a method.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error("Not enough arguments for '{method}': {required} required, {supplied} supplied")]
    NotEnough {
        method: String,
        required: usize,
        supplied: usize,
    },
    #[error("Missing value for required parameter '{param}' of '{method}'")]
    MissingRequired { method: String, param: String },
}

/// Errors that can occur while resolving the arguments of a call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Resolves `args` against `spec` into a validated [`ResolvedCall`].
///
/// Positional values left over once every required slot is filled are dropped, as are named
/// keys the method does not declare.
///
/// # Returns
///
/// * `Ok(ResolvedCall)` - The named, validated parameters of the call.
/// * `Err(ResolveError)` - If a required parameter cannot be filled or a value has the wrong type.
pub fn resolve(spec: &MethodSpec, args: CallArgs) -> Result<ResolvedCall, ResolveError> {
    let required = spec.required_count();

    if required > args.len() {
        return Err(ArgumentError::NotEnough {
            method: spec.name.clone(),
            required,
            supplied: args.len(),
        }
        .into());
    }

    let mut remaining = required;
    let mut params = Map::new();

    match args {
        CallArgs::Positional(values) => {
            let mut values = VecDeque::from(values);

            for param in &spec.params {
                let value = if param.required || remaining > 0 {
                    values.pop_front()
                } else {
                    None
                };

                let Some(value) = value else {
                    if param.required {
                        return Err(missing(spec, &param.name));
                    }
                    continue;
                };

                remaining = remaining.saturating_sub(1);
                params.insert(
                    param.name.clone(),
                    validate(&param.name, value, &param.kind)?,
                );
            }

            if !values.is_empty() {
                tracing::debug!(
                    method = %spec.name,
                    dropped = values.len(),
                    "ignoring extra positional arguments"
                );
            }
        }
        CallArgs::Named(mut map) => {
            for param in &spec.params {
                match map.remove(&param.name) {
                    Some(value) if !value.is_null() => {
                        remaining = remaining.saturating_sub(1);
                        params.insert(
                            param.name.clone(),
                            validate(&param.name, value, &param.kind)?,
                        );
                    }
                    _ if param.required => return Err(missing(spec, &param.name)),
                    _ => {}
                }
            }

            if !map.is_empty() {
                let unknown: Vec<&str> = map.keys().map(String::as_str).collect();
                tracing::debug!(
                    method = %spec.name,
                    ?unknown,
                    "ignoring undeclared named arguments"
                );
            }
        }
    }

    Ok(ResolvedCall {
        method: spec.name.clone(),
        params,
    })
}

fn missing(spec: &MethodSpec, param: &str) -> ResolveError {
    ArgumentError::MissingRequired {
        method: spec.name.clone(),
        param: param.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ParamSpec, ParamType};
    use serde_json::json;

    fn param(name: &str, kind: ParamType, required: bool) -> ParamSpec {
        ParamSpec {
            name: name.to_string(),
            kind,
            required,
        }
    }

    fn domain_create() -> MethodSpec {
        MethodSpec {
            name: "domain.create".to_string(),
            params: vec![
                param("domain", ParamType::String, true),
                param("type", ParamType::String, true),
                param("ttl_sec", ParamType::Integer, false),
            ],
        }
    }

    fn args(values: Value) -> CallArgs {
        CallArgs::from(values)
    }

    #[test]
    fn test_positional_fills_required_in_order() {
        let call = resolve(&domain_create(), args(json!(["example.com", "master"]))).unwrap();

        assert_eq!(call.method, "domain.create");
        assert_eq!(
            Value::Object(call.params),
            json!({ "domain": "example.com", "type": "master" })
        );
    }

    #[test]
    fn test_not_enough_positional_arguments() {
        let err = resolve(&domain_create(), args(json!(["example.com"]))).unwrap_err();

        assert_eq!(
            err,
            ResolveError::Argument(ArgumentError::NotEnough {
                method: "domain.create".to_string(),
                required: 2,
                supplied: 1,
            })
        );
    }

    #[test]
    fn test_extra_positional_arguments_are_dropped() {
        let call = resolve(
            &domain_create(),
            args(json!(["example.com", "master", 300, "extra"])),
        )
        .unwrap();

        // Once every required slot is filled, optional parameters only come from named args.
        assert_eq!(
            Value::Object(call.params),
            json!({ "domain": "example.com", "type": "master" })
        );
    }

    #[test]
    fn test_named_arguments() {
        let call = resolve(
            &domain_create(),
            args(json!({ "type": "slave", "domain": "example.org", "ttl_sec": "3600" })),
        )
        .unwrap();

        let names: Vec<&str> = call.params.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["domain", "type", "ttl_sec"]);
        assert_eq!(call.params["ttl_sec"], json!("3600"));
    }

    #[test]
    fn test_named_arguments_missing_required_key() {
        let err = resolve(
            &domain_create(),
            args(json!({ "domain": "example.org", "ttl_sec": 60 })),
        )
        .unwrap_err();

        assert_eq!(
            err,
            ResolveError::Argument(ArgumentError::MissingRequired {
                method: "domain.create".to_string(),
                param: "type".to_string(),
            })
        );
    }

    #[test]
    fn test_named_arguments_with_too_few_keys() {
        let err = resolve(&domain_create(), args(json!({ "domain": "a.com" }))).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Argument(ArgumentError::NotEnough { supplied: 1, .. })
        ));
    }

    #[test]
    fn test_named_null_counts_as_absent() {
        let err = resolve(
            &domain_create(),
            args(json!({ "domain": "a.com", "type": null })),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ResolveError::Argument(ArgumentError::MissingRequired {
                method: "domain.create".to_string(),
                param: "type".to_string(),
            })
        );

        let call = resolve(
            &domain_create(),
            args(json!({ "domain": "a.com", "type": "master", "ttl_sec": null })),
        )
        .unwrap();
        assert_eq!(
            Value::Object(call.params),
            json!({ "domain": "a.com", "type": "master" })
        );
    }

    #[test]
    fn test_positional_null_is_validated() {
        let err = resolve(&domain_create(), args(json!([null, "master"]))).unwrap_err();

        assert_eq!(
            err,
            ResolveError::Type(TypeError {
                param: "domain".to_string(),
                expected: ParamType::String,
                found: "null",
            })
        );
    }

    #[test]
    fn test_undeclared_named_keys_are_ignored() {
        let spec = MethodSpec {
            name: "domain.list".to_string(),
            params: vec![param("DomainID", ParamType::Integer, false)],
        };

        let call = resolve(&spec, args(json!({ "DomainID": 5, "bogus": true }))).unwrap();

        assert_eq!(Value::Object(call.params), json!({ "DomainID": 5 }));
    }

    #[test]
    fn test_optional_before_required_consumes_positional_values() {
        let spec = MethodSpec {
            name: "domain.resource.update".to_string(),
            params: vec![
                param("DomainID", ParamType::Integer, false),
                param("ResourceID", ParamType::Integer, true),
            ],
        };

        // The optional DomainID takes the single value, leaving ResourceID unfilled.
        let err = resolve(&spec, args(json!([10]))).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Argument(ArgumentError::MissingRequired { ref param, .. })
                if param == "ResourceID"
        ));

        let call = resolve(&spec, args(json!([10, 20]))).unwrap();
        assert_eq!(
            Value::Object(call.params),
            json!({ "DomainID": 10, "ResourceID": 20 })
        );
    }

    #[test]
    fn test_zero_required_without_arguments() {
        let spec = MethodSpec {
            name: "domain.list".to_string(),
            params: vec![param("DomainID", ParamType::Integer, false)],
        };

        let call = resolve(&spec, CallArgs::none()).unwrap();

        assert!(call.params.is_empty());
    }

    #[test]
    fn test_type_errors_propagate() {
        let err = resolve(&domain_create(), args(json!(["example.com", 1]))).unwrap_err();

        assert_eq!(
            err,
            ResolveError::Type(TypeError {
                param: "type".to_string(),
                expected: ParamType::String,
                found: "number",
            })
        );
    }

    #[test]
    fn test_boolean_arguments_are_normalized() {
        let spec = MethodSpec {
            name: "linode.delete".to_string(),
            params: vec![
                param("LinodeID", ParamType::Integer, true),
                param("skipChecks", ParamType::Boolean, false),
            ],
        };

        let call = resolve(&spec, args(json!({ "LinodeID": 1, "skipChecks": false }))).unwrap();

        assert_eq!(call.params["skipChecks"], json!("false"));
    }
}

//! Declarative input constraints for query strings and JSON bodies.
//!
//! Each request type lists its [`FieldRule`]s through [`RuleSet`]; the
//! extractors in `middleware::validate` run them before a handler sees the
//! request and turn any failures into a single 400 response.

pub mod formats;
pub mod rule;

use serde::Serialize;
use serde_json::{Map, Value};

pub use rule::FieldRule;

/// Where a validated value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
    Params,
}

/// One failed constraint: `{value, msg, param, location}` on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub param: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(
        value: Option<Value>,
        msg: impl Into<String>,
        param: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            value,
            msg: msg.into(),
            param: param.into(),
            location,
        }
    }
}

/// The rules bound to one request type
pub trait RuleSet {
    fn rules() -> Vec<FieldRule>;

    /// Run every rule against `input`, sanitizing it in place.
    /// All failures are collected, in rule order.
    fn validate(input: &mut Map<String, Value>) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = Self::rules()
            .iter()
            .filter_map(|rule| rule.apply(input).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Sample;

    impl RuleSet for Sample {
        fn rules() -> Vec<FieldRule> {
            vec![
                FieldRule::body("name", "bad name").trim().length(1, 15),
                FieldRule::body("abbreviation", "bad abbreviation").trim().length(1, 5),
            ]
        }
    }

    #[test]
    fn collects_every_failure_in_rule_order() {
        let mut input = json!({ "name": "   ", "abbreviation": "TOOLONG" })
            .as_object()
            .cloned()
            .unwrap();
        let errors = Sample::validate(&mut input).unwrap_err();
        let params: Vec<&str> = errors.iter().map(|e| e.param.as_str()).collect();
        assert_eq!(params, vec!["name", "abbreviation"]);
        assert_eq!(errors[0].value, Some(json!("")));
    }

    #[test]
    fn passing_input_is_sanitized() {
        let mut input = json!({ "name": "  Cardio ", "abbreviation": "CRD" })
            .as_object()
            .cloned()
            .unwrap();
        Sample::validate(&mut input).unwrap();
        assert_eq!(input["name"], "Cardio");
    }

    #[test]
    fn location_serializes_lowercase() {
        let err = FieldError::new(Some(json!("7")), "nope", "id", Location::Params);
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "value": "7", "msg": "nope", "param": "id", "location": "params" })
        );
    }
}

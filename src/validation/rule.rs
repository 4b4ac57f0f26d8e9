use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

static UUID4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid4 pattern is valid")
});

/// A single check applied to one field of a request body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    String,
    Integer,
    NotEmpty,
    Positive,
    /// Length (strings, arrays, objects) or value (numbers) must be below the bound
    LessThan(u64),
    /// Length (strings, arrays, objects) or value (numbers) must reach the bound
    GreaterThanOrEqual(u64),
    Uuid4,
}

impl Rule {
    /// Returns true when `value` satisfies the rule. An absent field is passed as `None`
    /// and fails every rule.
    pub fn check(&self, value: Option<&Value>) -> bool {
        let value = match value {
            Some(Value::Null) | None => return false,
            Some(v) => v,
        };

        match self {
            Rule::Required => true,
            Rule::String => value.is_string(),
            Rule::Integer => value.as_f64().map(|n| n.fract() == 0.0).unwrap_or(false),
            Rule::NotEmpty => value.as_str().map(|s| !s.trim().is_empty()).unwrap_or(false),
            Rule::Positive => value.as_f64().map(|n| n >= 0.0).unwrap_or(false),
            Rule::LessThan(bound) => measure(value).map(|m| m < *bound as f64).unwrap_or(false),
            Rule::GreaterThanOrEqual(bound) => {
                measure(value).map(|m| m >= *bound as f64).unwrap_or(false)
            }
            Rule::Uuid4 => value.as_str().map(|s| UUID4.is_match(s)).unwrap_or(false),
        }
    }

    /// Human readable message for a failed check on `field`
    pub fn message(&self, field: &str) -> String {
        match self {
            Rule::Required => format!("{} is required", field),
            Rule::String => format!("{} must be string", field),
            Rule::Integer => format!("{} must be integer", field),
            Rule::NotEmpty => format!("{} must not be empty", field),
            Rule::Positive => format!("{} must be positive", field),
            Rule::LessThan(bound) => format!("{} must be less than {}", field, bound),
            Rule::GreaterThanOrEqual(bound) => {
                format!("{} must be greater than or equal to {}", field, bound)
            }
            Rule::Uuid4 => format!("{} must be uuidv4", field),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "required"),
            Rule::String => write!(f, "string"),
            Rule::Integer => write!(f, "integer"),
            Rule::NotEmpty => write!(f, "notEmpty"),
            Rule::Positive => write!(f, "positive"),
            Rule::LessThan(bound) => write!(f, "lt={}", bound),
            Rule::GreaterThanOrEqual(bound) => write!(f, "gte={}", bound),
            Rule::Uuid4 => write!(f, "uuid4"),
        }
    }
}

/// Size used by the bound rules: char count for strings, element count for
/// arrays and objects, the value itself for numbers. Booleans have no size.
fn measure(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Number(n) => n.as_f64(),
        Value::Bool(_) | Value::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_and_null_fail_every_rule() {
        let rules = [
            Rule::Required,
            Rule::String,
            Rule::Integer,
            Rule::NotEmpty,
            Rule::Positive,
            Rule::LessThan(10),
            Rule::GreaterThanOrEqual(0),
            Rule::Uuid4,
        ];
        for rule in rules {
            assert!(!rule.check(None), "{} accepted an absent value", rule);
            assert!(!rule.check(Some(&Value::Null)), "{} accepted null", rule);
        }
    }

    #[test]
    fn required_accepts_zero_values() {
        assert!(Rule::Required.check(Some(&json!(""))));
        assert!(Rule::Required.check(Some(&json!(0))));
        assert!(Rule::Required.check(Some(&json!(false))));
    }

    #[test]
    fn integer_accepts_whole_numbers_only() {
        assert!(Rule::Integer.check(Some(&json!(1))));
        assert!(Rule::Integer.check(Some(&json!(-1))));
        assert!(Rule::Integer.check(Some(&json!(2.0))));
        assert!(!Rule::Integer.check(Some(&json!(1.5))));
        assert!(!Rule::Integer.check(Some(&json!("1"))));
    }

    #[test]
    fn positive_includes_zero() {
        assert!(Rule::Positive.check(Some(&json!(0))));
        assert!(Rule::Positive.check(Some(&json!(1))));
        assert!(!Rule::Positive.check(Some(&json!(-1))));
        assert!(!Rule::Positive.check(Some(&json!("5"))));
    }

    #[test]
    fn not_empty_trims_whitespace() {
        assert!(!Rule::NotEmpty.check(Some(&json!(""))));
        assert!(!Rule::NotEmpty.check(Some(&json!(" \t "))));
        assert!(!Rule::NotEmpty.check(Some(&json!(3))));
        assert!(Rule::NotEmpty.check(Some(&json!(" a "))));
    }

    #[test]
    fn bounds_measure_by_kind() {
        assert!(Rule::LessThan(4).check(Some(&json!("abc"))));
        assert!(!Rule::LessThan(4).check(Some(&json!("abcd"))));
        // chars, not bytes
        assert!(Rule::LessThan(4).check(Some(&json!("ééé"))));
        assert!(Rule::LessThan(1000).check(Some(&json!(999))));
        assert!(!Rule::LessThan(1000).check(Some(&json!(1000))));
        assert!(Rule::LessThan(2).check(Some(&json!([1]))));
        assert!(!Rule::LessThan(2).check(Some(&json!(true))));
        assert!(!Rule::GreaterThanOrEqual(8).check(Some(&json!("abc"))));
        assert!(Rule::GreaterThanOrEqual(3).check(Some(&json!("abc"))));
    }

    #[test]
    fn uuid4_requires_lowercase_v4() {
        assert!(Rule::Uuid4.check(Some(&json!("849702fc-aad3-478f-9dd7-9963b4ca33ca"))));
        assert!(!Rule::Uuid4.check(Some(&json!("849702FC-AAD3-478F-9DD7-9963B4CA33CA"))));
        assert!(!Rule::Uuid4.check(Some(&json!("849702fc-aad3-178f-9dd7-9963b4ca33ca"))));
        assert!(!Rule::Uuid4.check(Some(&json!("abc"))));
    }

    #[test]
    fn messages_carry_bound() {
        assert_eq!(Rule::LessThan(256).message("name"), "name must be less than 256");
        assert_eq!(
            Rule::GreaterThanOrEqual(8).message("field1"),
            "field1 must be greater than or equal to 8"
        );
    }
}

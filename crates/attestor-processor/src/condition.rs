// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Boolean condition expressions used by the `validate` and `conditionalOn`
//! operators.
//!
//! A condition is a JSON object with exactly one operator key, e.g.
//! `{"eq": "JPY"}` or `{"or": [{"eq": "JPY"}, {"eq": "KRW"}]}`. The empty
//! object is accepted and evaluates to false.

use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::value::Value;

const OPERATORS: &[&str] = &[
    "eq", "ne", "gt", "lt", "gte", "lte", "contains", "startsWith", "endsWith", "matches", "and",
    "or", "not",
];

/// A condition expression evaluated against a single subject value.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// The empty expression; always false.
    Empty,
    /// Strict equality with the operand.
    Eq(serde_json::Value),
    /// Strict inequality with the operand.
    Ne(serde_json::Value),
    /// Numeric greater-than.
    Gt(serde_json::Value),
    /// Numeric less-than.
    Lt(serde_json::Value),
    /// Numeric greater-or-equal.
    Gte(serde_json::Value),
    /// Numeric less-or-equal.
    Lte(serde_json::Value),
    /// Substring containment on the subject's string form.
    Contains(serde_json::Value),
    /// Prefix match on the subject's string form.
    StartsWith(serde_json::Value),
    /// Suffix match on the subject's string form.
    EndsWith(serde_json::Value),
    /// Regex match on the subject's string form.
    Matches(String),
    /// Conjunction; true when every child is true.
    And(Vec<Condition>),
    /// Disjunction; true when any child is true.
    Or(Vec<Condition>),
    /// Negation.
    Not(Box<Condition>),
}

/// Failure while evaluating a condition (an invalid regex pattern).
#[derive(Error, Debug)]
#[error("{0}")]
pub struct ConditionError(String);

/// Evaluates `condition` against `subject`.
///
/// Numeric comparators coerce the subject to a number and are false when the
/// subject has no numeric form. String matchers operate on the subject's
/// string coercion.
pub fn eval(subject: &Value, condition: &Condition) -> Result<bool, ConditionError> {
    match condition {
        Condition::Empty => Ok(false),
        Condition::Eq(operand) => Ok(subject.strict_eq(&Value::from(operand))),
        Condition::Ne(operand) => Ok(!subject.strict_eq(&Value::from(operand))),
        Condition::Gt(operand) => Ok(compare(subject, operand, |a, b| a > b)),
        Condition::Lt(operand) => Ok(compare(subject, operand, |a, b| a < b)),
        Condition::Gte(operand) => Ok(compare(subject, operand, |a, b| a >= b)),
        Condition::Lte(operand) => Ok(compare(subject, operand, |a, b| a <= b)),
        Condition::Contains(operand) => {
            Ok(subject.safe_string().contains(&Value::from(operand).safe_string()))
        }
        Condition::StartsWith(operand) => {
            Ok(subject.safe_string().starts_with(&Value::from(operand).safe_string()))
        }
        Condition::EndsWith(operand) => {
            Ok(subject.safe_string().ends_with(&Value::from(operand).safe_string()))
        }
        Condition::Matches(pattern) => {
            let re = Regex::new(pattern)
                .map_err(|e| ConditionError(format!("invalid regex '{pattern}': {e}")))?;
            Ok(re.is_match(&subject.safe_string()))
        }
        Condition::And(children) => {
            for child in children {
                if !eval(subject, child)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Condition::Or(children) => {
            for child in children {
                if eval(subject, child)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Condition::Not(child) => Ok(!eval(subject, child)?),
    }
}

fn compare(subject: &Value, operand: &serde_json::Value, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (subject.as_number(), Value::from(operand).as_number()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if matches!(self, Condition::Empty) { 0 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        match self {
            Condition::Empty => {}
            Condition::Eq(v) => map.serialize_entry("eq", v)?,
            Condition::Ne(v) => map.serialize_entry("ne", v)?,
            Condition::Gt(v) => map.serialize_entry("gt", v)?,
            Condition::Lt(v) => map.serialize_entry("lt", v)?,
            Condition::Gte(v) => map.serialize_entry("gte", v)?,
            Condition::Lte(v) => map.serialize_entry("lte", v)?,
            Condition::Contains(v) => map.serialize_entry("contains", v)?,
            Condition::StartsWith(v) => map.serialize_entry("startsWith", v)?,
            Condition::EndsWith(v) => map.serialize_entry("endsWith", v)?,
            Condition::Matches(p) => map.serialize_entry("matches", p)?,
            Condition::And(cs) => map.serialize_entry("and", cs)?,
            Condition::Or(cs) => map.serialize_entry("or", cs)?,
            Condition::Not(c) => map.serialize_entry("not", c)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CondVisitor;

        impl<'de> Visitor<'de> for CondVisitor {
            type Value = Condition;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a condition object with at most one operator key")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Condition, A::Error> {
                let mut condition = None;
                while let Some(key) = map.next_key::<String>()? {
                    if condition.is_some() {
                        return Err(de::Error::custom(
                            "condition must contain exactly one operator key",
                        ));
                    }
                    condition = Some(match key.as_str() {
                        "eq" => Condition::Eq(map.next_value()?),
                        "ne" => Condition::Ne(map.next_value()?),
                        "gt" => Condition::Gt(map.next_value()?),
                        "lt" => Condition::Lt(map.next_value()?),
                        "gte" => Condition::Gte(map.next_value()?),
                        "lte" => Condition::Lte(map.next_value()?),
                        "contains" => Condition::Contains(map.next_value()?),
                        "startsWith" => Condition::StartsWith(map.next_value()?),
                        "endsWith" => Condition::EndsWith(map.next_value()?),
                        "matches" => Condition::Matches(map.next_value()?),
                        "and" => Condition::And(map.next_value()?),
                        "or" => Condition::Or(map.next_value()?),
                        "not" => Condition::Not(Box::new(map.next_value()?)),
                        other => return Err(de::Error::unknown_field(other, OPERATORS)),
                    });
                }
                Ok(condition.unwrap_or(Condition::Empty))
            }
        }

        deserializer.deserialize_map(CondVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: serde_json::Value) -> Condition {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn equality_is_strict() {
        let cond = parse(json!({"eq": "JPY"}));
        assert!(eval(&Value::String("JPY".into()), &cond).unwrap());
        assert!(!eval(&Value::String("USD".into()), &cond).unwrap());
        // "1" (string) is not 1 (number)
        let one = parse(json!({"eq": 1}));
        assert!(!eval(&Value::String("1".into()), &one).unwrap());
        assert!(eval(&Value::Int(1), &one).unwrap());
    }

    #[test]
    fn numeric_comparators_coerce_subject() {
        let cond = parse(json!({"gte": 100}));
        assert!(eval(&Value::String("150".into()), &cond).unwrap());
        assert!(!eval(&Value::String("99.5".into()), &cond).unwrap());
        // unparseable subject is false, not an error
        assert!(!eval(&Value::String("abc".into()), &cond).unwrap());
    }

    #[test]
    fn string_matchers() {
        let subject = Value::String("hello world".into());
        assert!(eval(&subject, &parse(json!({"contains": "lo w"}))).unwrap());
        assert!(eval(&subject, &parse(json!({"startsWith": "hello"}))).unwrap());
        assert!(eval(&subject, &parse(json!({"endsWith": "world"}))).unwrap());
        assert!(eval(&subject, &parse(json!({"matches": "^h.*d$"}))).unwrap());
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let cond = parse(json!({"matches": "("}));
        assert!(eval(&Value::String("x".into()), &cond).is_err());
    }

    #[test]
    fn boolean_combinators() {
        let cond = parse(json!({"or": [{"eq": "JPY"}, {"eq": "KRW"}]}));
        assert!(eval(&Value::String("KRW".into()), &cond).unwrap());
        assert!(!eval(&Value::String("USD".into()), &cond).unwrap());

        let cond = parse(json!({"and": [{"gt": 0}, {"not": {"gt": 10}}]}));
        assert!(eval(&Value::Int(5), &cond).unwrap());
        assert!(!eval(&Value::Int(50), &cond).unwrap());
    }

    #[test]
    fn empty_condition_is_false() {
        let cond = parse(json!({}));
        assert!(!eval(&Value::String("anything".into()), &cond).unwrap());
    }

    #[test]
    fn multiple_operator_keys_are_rejected() {
        let raw = json!({"eq": 1, "ne": 2});
        assert!(serde_json::from_value::<Condition>(raw).is_err());
    }

    #[test]
    fn serialization_round_trips() {
        let cond = parse(json!({"or": [{"eq": "JPY"}, {"not": {"lt": 3}}]}));
        let text = serde_json::to_string(&cond).unwrap();
        assert_eq!(parse(serde_json::from_str(&text).unwrap()), cond);
    }
}

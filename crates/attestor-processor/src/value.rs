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

//! The scalar value model that flows through transform pipelines.
//!
//! Every operator consumes and produces a [`Value`]. Claims arrive as JSON,
//! so the model mirrors the JSON data types, plus a byte-string variant for
//! hash preimages. Maps preserve insertion order because transform
//! declaration order is observable.

use indexmap::IndexMap;

/// A dynamically typed value inside a transform pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// JSON null, or an absent field.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer that fits `i64`.
    Int(i64),
    /// Any other JSON number.
    Float(f64),
    /// A text string.
    String(String),
    /// A raw byte string.
    Bytes(Vec<u8>),
    /// An ordered sequence.
    Seq(Vec<Value>),
    /// An insertion-ordered map.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Coerces the value to its string form.
    ///
    /// Null becomes the empty string, booleans become `true`/`false`,
    /// numbers their shortest decimal form, bytes lowercase `0x`-hex, and
    /// sequences or maps their JSON serialization.
    pub fn safe_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => format!("0x{}", alloy_primitives::hex::encode(b)),
            Value::Seq(_) | Value::Map(_) => {
                serde_json::to_string(&self.to_json()).unwrap_or_else(|_| "[object]".into())
            }
        }
    }

    /// Coerces the value to a number, following the same rules as the
    /// numeric condition comparators. Returns `None` when the value has no
    /// numeric interpretation.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Strict equality: same type tag and same scalar, with integers and
    /// floats compared numerically. Sequences and maps compare element-wise.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Seq(a), Value::Seq(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| v.strict_eq(w)))
            }
            (a, b) => a == b,
        }
    }

    /// Whether the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Byte length of the value's string payload, for size-limit checks.
    /// Non-string values report zero; they are bounded by the input.
    pub fn string_len(&self) -> usize {
        match self {
            Value::String(s) => s.len(),
            _ => 0,
        }
    }

    /// Converts back into a `serde_json::Value`. Bytes render as `0x`-hex.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => {
                serde_json::Value::String(format!("0x{}", alloy_primitives::hex::encode(b)))
            }
            Value::Seq(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::MAX)),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Seq(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(entries) => Value::Map(
                entries.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_string_coercions() {
        assert_eq!(Value::Null.safe_string(), "");
        assert_eq!(Value::Bool(true).safe_string(), "true");
        assert_eq!(Value::Int(42).safe_string(), "42");
        assert_eq!(Value::Float(1.5).safe_string(), "1.5");
        assert_eq!(Value::Float(1.0).safe_string(), "1");
        assert_eq!(Value::String("abc".into()).safe_string(), "abc");
        assert_eq!(Value::Bytes(vec![0xde, 0xad]).safe_string(), "0xdead");
    }

    #[test]
    fn safe_string_serializes_structures() {
        let v = Value::from(json!({"a": [1, "two"]}));
        assert_eq!(v.safe_string(), r#"{"a":[1,"two"]}"#);
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::String(" 1.25 ".into()).as_number(), Some(1.25));
        assert_eq!(Value::Int(-3).as_number(), Some(-3.0));
        assert_eq!(Value::Bool(true).as_number(), Some(1.0));
        assert_eq!(Value::String("abc".into()).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn strict_equality_crosses_number_variants() {
        assert!(Value::Int(1).strict_eq(&Value::Float(1.0)));
        assert!(!Value::Int(1).strict_eq(&Value::String("1".into())));
        assert!(!Value::Bool(true).strict_eq(&Value::Int(1)));
        let a = Value::from(json!(["x", 2]));
        let b = Value::from(json!(["x", 2.0]));
        assert!(a.strict_eq(&b));
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let v = Value::from(json!({"b": 1, "a": 2}));
        let Value::Map(entries) = &v else { panic!("expected map") };
        let keys: Vec<_> = entries.keys().collect();
        assert_eq!(keys, ["b", "a"]);
    }
}

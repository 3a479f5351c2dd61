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

//! The transform operator registry.
//!
//! Operators form a closed catalogue: each is a variant of [`Op`] carrying
//! exactly its parameters, and dispatch is a match in [`apply`]. All
//! operators are pure; none may touch I/O, the clock (timestamp parsing
//! reads its input only) or any state outside the value they are given.
//!
//! In a processor document an op is either a bare operator-name string (for
//! parameterless operators) or an object tagged with `type`. Unknown names
//! are a deserialization error.

mod asserts;
mod combine;
mod hashing;
mod math;
mod strings;
mod timestamp;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::condition::Condition;
use crate::error::ExecutionError;
use crate::value::Value;

/// A single transform step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Op {
    /// Lowercases the string form of the value.
    ToLowerCase,
    /// Uppercases the string form of the value.
    ToUpperCase,
    /// Trims surrounding whitespace from the string form of the value.
    Trim,
    /// Takes the character range `[start, end)` of the string form. When
    /// `end` precedes `start` the bounds are swapped; out-of-range bounds
    /// clamp to the string, so a `start` past the end yields the empty
    /// string.
    Substring {
        /// Start index, counted in characters.
        start: u64,
        /// Exclusive end index; the end of the string when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<u64>,
    },
    /// Replaces occurrences of `pattern` in the string form.
    ///
    /// Patterns wrapped in `/…/`, or starting with a regex metacharacter,
    /// are compiled as regexes and always replace globally. Literal
    /// patterns replace the first occurrence unless `global` is set.
    Replace {
        /// Literal text or regex to search for.
        pattern: String,
        /// Replacement text; empty when absent.
        #[serde(default)]
        replacement: String,
        /// Replace every occurrence of a literal pattern.
        #[serde(default)]
        global: bool,
    },
    /// Applies `<op> <number>` arithmetic to the numeric form of the value.
    Math {
        /// Expression such as `* 100` or `/2`.
        expression: String,
    },
    /// Keccak-256 of the value's UTF-8 string form (or raw bytes), as
    /// 0x-prefixed lowercase hex.
    Keccak256,
    /// SHA-256 of the value's UTF-8 string form (or raw bytes), as
    /// 0x-prefixed lowercase hex.
    Sha256,
    /// Parses a timestamp and yields the UTC millisecond epoch as a decimal
    /// string.
    ParseTimestamp {
        /// Optional regex the raw input must match before parsing.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Fails the pipeline unless the value strictly equals `expected`.
    AssertEquals {
        /// The required value.
        expected: serde_json::Value,
        /// Failure message override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Fails the pipeline unless the value strictly equals one of `values`.
    AssertOneOf {
        /// The admissible values.
        values: Vec<serde_json::Value>,
        /// Failure message override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Fails the pipeline unless `condition` holds for the value.
    Validate {
        /// The condition to evaluate.
        condition: Condition,
        /// Failure message override.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Concatenates the string forms of a sequence value.
    Concat,
    /// Substitutes the value's string form for every `${value}` in
    /// `pattern`.
    Template {
        /// The template text.
        pattern: String,
    },
    /// Discards the value and yields the string form of `value`.
    Constant {
        /// The constant to produce; `null` yields the empty string.
        value: serde_json::Value,
    },
    /// Branches on a named variable: evaluates `if` against it and splices
    /// `then` or `else` into the pipeline at the current position. Branch
    /// bodies may not contain another `conditionalOn`.
    ConditionalOn {
        /// Variable the condition is evaluated against.
        #[serde(rename = "checkField")]
        check_field: String,
        /// The branch condition.
        #[serde(rename = "if")]
        condition: Condition,
        /// Ops applied when the condition holds.
        #[serde(deserialize_with = "deserialize_ops")]
        then: Vec<Op>,
        /// Ops applied otherwise; empty when absent.
        #[serde(
            rename = "else",
            default,
            deserialize_with = "deserialize_ops",
            skip_serializing_if = "Vec::is_empty"
        )]
        otherwise: Vec<Op>,
    },
}

impl Op {
    /// The operator name as written in processor documents.
    pub fn name(&self) -> &'static str {
        match self {
            Op::ToLowerCase => "toLowerCase",
            Op::ToUpperCase => "toUpperCase",
            Op::Trim => "trim",
            Op::Substring { .. } => "substring",
            Op::Replace { .. } => "replace",
            Op::Math { .. } => "math",
            Op::Keccak256 => "keccak256",
            Op::Sha256 => "sha256",
            Op::ParseTimestamp { .. } => "parseTimestamp",
            Op::AssertEquals { .. } => "assertEquals",
            Op::AssertOneOf { .. } => "assertOneOf",
            Op::Validate { .. } => "validate",
            Op::Concat => "concat",
            Op::Template { .. } => "template",
            Op::Constant { .. } => "constant",
            Op::ConditionalOn { .. } => "conditionalOn",
        }
    }
}

/// Applies a single operator to a value.
///
/// `conditionalOn` is not applied here: it expands into further ops and is
/// handled by the executor's pipeline queue.
pub(crate) fn apply(op: &Op, value: Value) -> Result<Value, ExecutionError> {
    match op {
        Op::ToLowerCase => Ok(Value::String(value.safe_string().to_lowercase())),
        Op::ToUpperCase => Ok(Value::String(value.safe_string().to_uppercase())),
        Op::Trim => Ok(Value::String(value.safe_string().trim().to_string())),
        Op::Substring { start, end } => strings::substring(&value, *start, *end),
        Op::Replace { pattern, replacement, global } => {
            strings::replace(&value, pattern, replacement, *global)
        }
        Op::Math { expression } => math::eval(&value, expression),
        Op::Keccak256 => Ok(hashing::keccak256(&value)),
        Op::Sha256 => Ok(hashing::sha256(&value)),
        Op::ParseTimestamp { format } => timestamp::parse(&value, format.as_deref()),
        Op::AssertEquals { expected, message } => {
            asserts::assert_equals(value, expected, message.as_deref())
        }
        Op::AssertOneOf { values, message } => {
            asserts::assert_one_of(value, values, message.as_deref())
        }
        Op::Validate { condition, message } => {
            asserts::validate(value, condition, message.as_deref())
        }
        Op::Concat => combine::concat(&value),
        Op::Template { pattern } => Ok(combine::template(&value, pattern)),
        Op::Constant { value: constant } => Ok(combine::constant(constant)),
        Op::ConditionalOn { .. } => Err(ExecutionError::op(
            "conditionalOn",
            "must be expanded by the executor pipeline",
        )),
    }
}

/// Deserializes an op list where each entry is either a bare operator-name
/// string or a `{type: …}` object.
pub(crate) fn deserialize_ops<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Op>, D::Error> {
    let raw: Vec<serde_json::Value> = Deserialize::deserialize(deserializer)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry = match entry {
                serde_json::Value::String(name) => serde_json::json!({ "type": name }),
                other => other,
            };
            serde_json::from_value(entry).map_err(|e| de::Error::custom(format!("ops[{i}]: {e}")))
        })
        .collect()
}

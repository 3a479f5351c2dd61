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

//! Validation operators: `assertEquals`, `assertOneOf` and `validate`.
//!
//! Each passes the value through unchanged on success and aborts the
//! execution on failure.

use crate::condition::{self, Condition};
use crate::error::ExecutionError;
use crate::value::Value;

pub(super) fn assert_equals(
    value: Value,
    expected: &serde_json::Value,
    message: Option<&str>,
) -> Result<Value, ExecutionError> {
    let expected = Value::from(expected);
    if value.strict_eq(&expected) {
        return Ok(value);
    }
    Err(ExecutionError::op(
        "assertEquals",
        message.map(str::to_string).unwrap_or_else(|| {
            format!("expected '{}', got '{}'", expected.safe_string(), value.safe_string())
        }),
    ))
}

pub(super) fn assert_one_of(
    value: Value,
    values: &[serde_json::Value],
    message: Option<&str>,
) -> Result<Value, ExecutionError> {
    if values.iter().any(|candidate| value.strict_eq(&Value::from(candidate))) {
        return Ok(value);
    }
    Err(ExecutionError::op(
        "assertOneOf",
        message.map(str::to_string).unwrap_or_else(|| {
            format!("value '{}' is not one of the allowed values", value.safe_string())
        }),
    ))
}

pub(super) fn validate(
    value: Value,
    cond: &Condition,
    message: Option<&str>,
) -> Result<Value, ExecutionError> {
    let holds = condition::eval(&value, cond)
        .map_err(|e| ExecutionError::op("validate", e.to_string()))?;
    if holds {
        return Ok(value);
    }
    Err(ExecutionError::op(
        "validate",
        message
            .map(str::to_string)
            .unwrap_or_else(|| format!("validation failed for value '{}'", value.safe_string())),
    ))
}

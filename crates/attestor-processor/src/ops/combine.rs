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

//! Combination operators: `concat`, `template` and `constant`.

use crate::error::ExecutionError;
use crate::value::Value;

const PLACEHOLDER: &str = "${value}";

pub(super) fn concat(value: &Value) -> Result<Value, ExecutionError> {
    let Value::Seq(items) = value else {
        return Err(ExecutionError::op("concat", "input must be a list of values"));
    };
    Ok(Value::String(items.iter().map(Value::safe_string).collect()))
}

pub(super) fn template(value: &Value, pattern: &str) -> Value {
    Value::String(pattern.replace(PLACEHOLDER, &value.safe_string()))
}

pub(super) fn constant(value: &serde_json::Value) -> Value {
    Value::String(Value::from(value).safe_string())
}

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

//! The executor: runs a validated processor against a claim.
//!
//! Execution is a synchronous three-phase pipeline. The extract phase runs
//! each JSONPath against the claim's query root and binds the first result.
//! The transform phase evaluates rules in declaration order, each rule an op
//! queue; `conditionalOn` splices its chosen branch at the front of the
//! queue. The output phase resolves each output name and coerces the value
//! to its string form. Every failure aborts the whole execution; a wall
//! clock deadline is checked between entries and at every op boundary.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde_json_path::JsonPath;
use tracing::debug;

use crate::claim::ClaimData;
use crate::condition;
use crate::error::ExecutionError;
use crate::ops::{self, Op};
use crate::processor::{Processor, TransformRule};
use crate::value::Value;

/// Default wall-clock budget for one execution.
pub const MAX_EXECUTION_TIME: Duration = Duration::from_millis(5000);
/// Default cap on the number of nodes a single JSONPath query may return.
pub const MAX_JSONPATH_RESULTS: usize = 1000;
/// Default cap on the number of output values.
pub const MAX_OUTPUT_VALUES: usize = 100;
/// Default cap on any intermediate string, in bytes.
pub const MAX_STRING_LENGTH: usize = 100_000;

/// Hard resource bounds for a single execution.
#[derive(Clone, Debug)]
pub struct ExecutionLimits {
    /// Wall-clock budget for the whole execution.
    pub max_execution_time: Duration,
    /// Cap on the number of nodes a JSONPath query may return.
    pub max_jsonpath_results: usize,
    /// Cap on the number of output values.
    pub max_output_values: usize,
    /// Cap on any intermediate string, in bytes.
    pub max_string_length: usize,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_execution_time: MAX_EXECUTION_TIME,
            max_jsonpath_results: MAX_JSONPATH_RESULTS,
            max_output_values: MAX_OUTPUT_VALUES,
            max_string_length: MAX_STRING_LENGTH,
        }
    }
}

impl ExecutionLimits {
    /// Sets the wall-clock budget.
    pub fn with_max_execution_time(self, max_execution_time: Duration) -> Self {
        Self { max_execution_time, ..self }
    }

    /// Sets the JSONPath result cap.
    pub fn with_max_jsonpath_results(self, max_jsonpath_results: usize) -> Self {
        Self { max_jsonpath_results, ..self }
    }

    /// Sets the output count cap.
    pub fn with_max_output_values(self, max_output_values: usize) -> Self {
        Self { max_output_values, ..self }
    }

    /// Sets the intermediate string size cap.
    pub fn with_max_string_length(self, max_string_length: usize) -> Self {
        Self { max_string_length, ..self }
    }
}

/// Executes `processor` against `claim` under the default limits.
///
/// The processor must already have passed [`Processor::validate`];
/// execution assumes every name reference resolves statically.
pub fn execute(processor: &Processor, claim: &ClaimData) -> Result<Vec<String>, ExecutionError> {
    execute_with_limits(processor, claim, &ExecutionLimits::default())
}

/// Executes `processor` against `claim` under explicit limits.
pub fn execute_with_limits(
    processor: &Processor,
    claim: &ClaimData,
    limits: &ExecutionLimits,
) -> Result<Vec<String>, ExecutionError> {
    let deadline = Instant::now() + limits.max_execution_time;
    let root = claim.query_root();

    let mut extracted: IndexMap<String, Value> = IndexMap::new();
    for (name, path) in &processor.extract {
        check_deadline(deadline)?;
        let query = JsonPath::parse(path).map_err(|_| ExecutionError::ExtractMissing {
            name: name.clone(),
            path: path.clone(),
        })?;
        let nodes = query.query(&root).all();
        if nodes.len() > limits.max_jsonpath_results {
            return Err(ExecutionError::ExtractOverflow {
                name: name.clone(),
                path: path.clone(),
                count: nodes.len(),
                limit: limits.max_jsonpath_results,
            });
        }
        let Some(first) = nodes.first() else {
            return Err(ExecutionError::ExtractMissing {
                name: name.clone(),
                path: path.clone(),
            });
        };
        let value = Value::from(*first);
        if value.string_len() > limits.max_string_length {
            return Err(ExecutionError::ResourceExceeded(format!(
                "extracted string for '{name}' exceeds {} bytes",
                limits.max_string_length,
            )));
        }
        extracted.insert(name.clone(), value);
    }
    debug!(variables = extracted.len(), "extract phase complete");

    let mut transformed: IndexMap<String, Value> = IndexMap::new();
    for (name, rule) in &processor.transform {
        check_deadline(deadline)?;
        let initial = resolve_rule_input(name, rule, &transformed, &extracted)?;
        let value =
            run_pipeline(name, rule, initial, &extracted, &transformed, deadline, limits)?;
        transformed.insert(name.clone(), value);
    }
    debug!(variables = transformed.len(), "transform phase complete");

    if processor.outputs.len() > limits.max_output_values {
        return Err(ExecutionError::ResourceExceeded(format!(
            "{} outputs exceed the limit of {}",
            processor.outputs.len(),
            limits.max_output_values,
        )));
    }
    let mut values = Vec::with_capacity(processor.outputs.len());
    for output in &processor.outputs {
        let value = resolve(&output.name, &transformed, &extracted)
            .ok_or_else(|| ExecutionError::OutputUndefined { name: output.name.clone() })?;
        if value.is_null() {
            return Err(ExecutionError::OutputUndefined { name: output.name.clone() });
        }
        values.push(value.safe_string());
    }
    Ok(values)
}

fn resolve_rule_input(
    name: &str,
    rule: &TransformRule,
    transformed: &IndexMap<String, Value>,
    extracted: &IndexMap<String, Value>,
) -> Result<Value, ExecutionError> {
    if let Some(input) = &rule.input {
        return resolve(input, transformed, extracted).ok_or_else(|| {
            ExecutionError::TransformInputUndefined {
                name: name.to_string(),
                input: input.clone(),
            }
        });
    }
    if let Some(inputs) = &rule.inputs {
        let mut items = Vec::with_capacity(inputs.len());
        for input in inputs {
            items.push(resolve(input, transformed, extracted).ok_or_else(|| {
                ExecutionError::TransformInputUndefined {
                    name: name.to_string(),
                    input: input.clone(),
                }
            })?);
        }
        return Ok(Value::Seq(items));
    }
    // source-less rule; the validator guarantees the first op is a constant
    Ok(Value::Null)
}

fn run_pipeline(
    name: &str,
    rule: &TransformRule,
    initial: Value,
    extracted: &IndexMap<String, Value>,
    transformed: &IndexMap<String, Value>,
    deadline: Instant,
    limits: &ExecutionLimits,
) -> Result<Value, ExecutionError> {
    let mut queue: VecDeque<&Op> = rule.ops.iter().collect();
    let mut value = initial;
    while let Some(op) = queue.pop_front() {
        check_deadline(deadline)?;
        match op {
            Op::ConditionalOn { check_field, condition: cond, then, otherwise } => {
                let subject = resolve(check_field, transformed, extracted).ok_or_else(|| {
                    ExecutionError::op(
                        "conditionalOn",
                        format!("unknown context field '{check_field}'"),
                    )
                })?;
                let taken = condition::eval(&subject, cond)
                    .map_err(|e| ExecutionError::op("conditionalOn", e.to_string()))?;
                let branch = if taken { then } else { otherwise };
                if branch.iter().any(|sub| matches!(sub, Op::ConditionalOn { .. })) {
                    return Err(ExecutionError::op(
                        "conditionalOn",
                        "branches may not contain another conditionalOn",
                    ));
                }
                // splice the branch in front of the remaining ops
                for sub in branch.iter().rev() {
                    queue.push_front(sub);
                }
            }
            other => {
                value = ops::apply(other, value)?;
                if value.string_len() > limits.max_string_length {
                    return Err(ExecutionError::ResourceExceeded(format!(
                        "intermediate string for '{name}' exceeds {} bytes",
                        limits.max_string_length,
                    )));
                }
            }
        }
    }
    Ok(value)
}

fn resolve(
    name: &str,
    transformed: &IndexMap<String, Value>,
    extracted: &IndexMap<String, Value>,
) -> Option<Value> {
    transformed.get(name).or_else(|| extracted.get(name)).cloned()
}

fn check_deadline(deadline: Instant) -> Result<(), ExecutionError> {
    if Instant::now() > deadline {
        return Err(ExecutionError::ResourceExceeded("execution time budget exhausted".into()));
    }
    Ok(())
}

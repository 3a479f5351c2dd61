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

//! The processor document: a declarative description of how to reduce a
//! claim to an ordered vector of typed output values.
//!
//! Processors are untrusted input. Deserialization enforces the schema
//! (unknown operators, missing required parameters); [`Processor::validate`]
//! enforces everything structural beyond that, so that execution can only
//! fail on input-value shape issues.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessorInvalid, ValidationError};
use crate::ops::{self, Op};

/// One output column: a variable name and the EVM ABI type the verifying
/// contract reinterprets its value under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Variable whose final value is emitted.
    pub name: String,
    /// EVM ABI type tag, e.g. `uint256` or `address`.
    pub r#type: String,
}

/// A transform rule: an op pipeline over one input, an ordered tuple of
/// inputs, or no input at all (in which case the first op must be
/// `constant`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    /// Single input variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Ordered tuple of input variables, passed to the first op as a
    /// sequence. Mutually exclusive with `input`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
    /// Ops applied left to right.
    #[serde(default, deserialize_with = "ops::deserialize_ops")]
    pub ops: Vec<Op>,
}

/// A processor document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    /// Schema version tag. When absent, the signing envelope injects its
    /// server-side version before identity hashing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Variable name → JSONPath, queried against the claim in iteration
    /// order.
    #[serde(default)]
    pub extract: IndexMap<String, String>,
    /// Variable name → transform rule, evaluated in declaration order. A
    /// transform may shadow an extracted variable of the same name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub transform: IndexMap<String, TransformRule>,
    /// Ordered output columns.
    #[serde(default)]
    pub outputs: Vec<OutputSpec>,
    /// Legacy single-list output shape, captured so validation can reject
    /// it with a dedicated message.
    #[serde(default, rename = "output", skip_serializing)]
    pub(crate) legacy_output: Option<serde_json::Value>,
}

impl Processor {
    /// Parses a processor document from JSON text. Schema violations are
    /// reported as a [`ProcessorInvalid`] with a single finding.
    pub fn from_json(text: &str) -> Result<Self, ProcessorInvalid> {
        serde_json::from_str(text).map_err(|e| ProcessorInvalid {
            errors: vec![ValidationError::new("", format!("malformed processor document: {e}"))],
        })
    }

    /// Runs the static validator. See [`crate::validate`].
    pub fn validate(&self) -> Result<(), ProcessorInvalid> {
        crate::validate::validate(self)
    }
}

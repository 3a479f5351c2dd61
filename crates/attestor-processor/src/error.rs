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

//! Error types for claim parsing, processor validation and execution.

use serde::Serialize;
use thiserror::Error;

/// A single static-validation finding, addressed by a dotted path into the
/// processor document (e.g. `transform.amount.ops[1]`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Location of the offending element.
    pub path: String,
    /// Description of the problem.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A processor document failed static validation. Carries every finding, in
/// document order.
#[derive(Error, Debug)]
#[error("invalid processor document: {}", .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ProcessorInvalid {
    /// All findings, in document order.
    pub errors: Vec<ValidationError>,
}

/// Errors raised while reading required fields out of a claim record.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ClaimError {
    /// The claim context does not embed a `providerHash` field.
    #[error("claim context is missing the providerHash field")]
    MissingProviderHash,

    /// The embedded provider hash is not 0x-prefixed 32-byte hex.
    #[error("malformed providerHash: {0}")]
    MalformedProviderHash(String),
}

/// Errors raised while executing a validated processor against a claim.
///
/// Every variant is fatal: execution aborts at the first failure and no
/// partial output is produced.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExecutionError {
    /// A JSONPath query produced no result for a required variable.
    #[error("Value extraction failed for '{name}' using JSONPath '{path}'")]
    ExtractMissing {
        /// Variable the extraction was bound to.
        name: String,
        /// The JSONPath expression that matched nothing.
        path: String,
    },

    /// A JSONPath query produced more results than the configured cap.
    #[error("JSONPath '{path}' for '{name}' returned {count} results, limit is {limit}")]
    ExtractOverflow {
        /// Variable the extraction was bound to.
        name: String,
        /// The offending JSONPath expression.
        path: String,
        /// Number of results the query produced.
        count: usize,
        /// The configured result cap.
        limit: usize,
    },

    /// A transform rule referenced a variable that has no value.
    #[error("transform '{name}' references undefined variable '{input}'")]
    TransformInputUndefined {
        /// The transform being evaluated.
        name: String,
        /// The variable that did not resolve.
        input: String,
    },

    /// An operator rejected its input.
    #[error("{op}: {message}")]
    OpFailure {
        /// Operator name as written in the processor document.
        op: &'static str,
        /// User-facing failure description.
        message: String,
    },

    /// A wall-clock or size bound was exceeded.
    #[error("resource limit exceeded: {0}")]
    ResourceExceeded(String),

    /// An output name did not resolve to a defined, non-null value.
    #[error("output '{name}' does not resolve to a defined value")]
    OutputUndefined {
        /// The output entry that failed to resolve.
        name: String,
    },
}

impl ExecutionError {
    pub(crate) fn op(op: &'static str, message: impl Into<String>) -> Self {
        Self::OpFailure { op, message: message.into() }
    }
}

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

//! Error types for ABI encoding and the signing envelope.

use attestor_processor::{ClaimError, ExecutionError, ProcessorInvalid};
use thiserror::Error;

/// Errors from coercing output values into EVM ABI values.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EncodingError {
    /// The type tag is outside the recognised EVM type set.
    #[error("unsupported EVM type '{0}'")]
    UnsupportedType(String),

    /// A value could not be coerced to its declared type.
    #[error("cannot encode '{value}' as {ty}: {reason}")]
    InvalidValue {
        /// The declared ABI type.
        ty: String,
        /// The value that failed to coerce.
        value: String,
        /// Why the coercion failed.
        reason: String,
    },

    /// The number of values does not match the number of output columns.
    #[error("{values} values for {outputs} outputs")]
    ArityMismatch {
        /// Number of declared output columns.
        outputs: usize,
        /// Number of values supplied.
        values: usize,
    },
}

/// Top-level error of the signing envelope. Processing never yields a
/// partial result: any failure along the pipeline surfaces here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EnvelopeError {
    /// The processor document failed static validation.
    #[error(transparent)]
    ProcessorInvalid(#[from] ProcessorInvalid),

    /// The claim is missing or carries a malformed provider hash.
    #[error(transparent)]
    Claim(#[from] ClaimError),

    /// Execution of the processor against the claim failed.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// ABI coercion or encoding rejected a value.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The processor document could not be serialized for identity hashing.
    #[error("processor serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Signature production failed.
    #[error("signer failure: {0}")]
    Signer(#[from] alloy::signers::Error),

    /// The signature bytes are not a 65-byte `(r, s, v)` signature.
    #[error("malformed signature: {0}")]
    MalformedSignature(#[from] alloy_primitives::SignatureError),
}

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

//! Deployment configuration for an attestor.
//!
//! The attestor and its verifying contract must agree on the signature
//! convention; pinning it here keeps one deployment from mixing the two.

use std::borrow::Cow;

use attestor_processor::ExecutionLimits;
use serde::{Deserialize, Serialize};

/// Version injected into processor documents that carry no `version` tag,
/// so identity hashes are stable across clients that omit it.
pub const DEFAULT_PROCESSOR_VERSION: &str = "1.0.0";

/// How the message hash is bound into the signed digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureType {
    /// ECDSA over the EIP-191 personal-message prefix of the 32-byte
    /// message hash. The verifying contract applies the same prefix before
    /// `ecrecover`.
    EthPersonal,
    /// ECDSA directly over the message hash; the contract calls `ecrecover`
    /// on the raw digest.
    EthRaw,
}

/// Configuration for one attestor deployment.
#[derive(Clone, Debug)]
pub struct Deployment {
    /// Signature convention the verifying contract expects.
    pub signature_type: SignatureType,
    /// Execution limits applied to every claim.
    pub limits: ExecutionLimits,
    /// Version injected into processors without a `version` tag before
    /// identity hashing.
    pub processor_version: Cow<'static, str>,
}

impl Default for Deployment {
    fn default() -> Self {
        Self {
            signature_type: SignatureType::EthPersonal,
            limits: ExecutionLimits::default(),
            processor_version: Cow::Borrowed(DEFAULT_PROCESSOR_VERSION),
        }
    }
}

impl Deployment {
    /// Sets the signature convention.
    pub fn with_signature_type(self, signature_type: SignatureType) -> Self {
        Self { signature_type, ..self }
    }

    /// Sets the execution limits.
    pub fn with_limits(self, limits: ExecutionLimits) -> Self {
        Self { limits, ..self }
    }

    /// Sets the processor version injected before identity hashing.
    pub fn with_processor_version(self, version: impl Into<Cow<'static, str>>) -> Self {
        Self { processor_version: version.into(), ..self }
    }
}

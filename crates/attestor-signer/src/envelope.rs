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

//! The signing envelope: validate → execute → encode → sign.
//!
//! The attestor key is process-wide and read-only after boot; each
//! processing call borrows it. Signing is the only asynchronous step.

use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use alloy_primitives::{eip191_hash_message, Address, Bytes, Signature, B256};
use attestor_processor::{execute_with_limits, ClaimData, OutputSpec, Processor};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Deployment, SignatureType};
use crate::error::EnvelopeError;
use crate::{abi, identity};

/// The signed artifact produced for a processed claim.
///
/// The contents match the calldata the verifying contract hashes: the
/// signature is recoverable over `keccak256(abi.encode((bytes32, ...types),
/// (processorProviderHash, ...values)))` under the deployment's signature
/// convention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedClaimData {
    /// keccak256 binding of the provider template and processor document.
    pub processor_provider_hash: B256,
    /// 65-byte `(r, s, v)` attestor signature; `v` is 27 or 28.
    pub signature: Bytes,
    /// The processor's output columns, in order.
    pub outputs: Vec<OutputSpec>,
    /// String form of each output value, index-aligned with `outputs`.
    pub values: Vec<String>,
}

/// Holds the attestor signing key and deployment configuration.
#[derive(Clone, Debug)]
pub struct Attestor {
    signer: PrivateKeySigner,
    deployment: Deployment,
}

impl Attestor {
    /// Creates an attestor with the default deployment configuration.
    pub fn new(signer: PrivateKeySigner) -> Self {
        Self { signer, deployment: Deployment::default() }
    }

    /// Sets the deployment configuration.
    pub fn with_deployment(self, deployment: Deployment) -> Self {
        Self { deployment, ..self }
    }

    /// The address recoverable from this attestor's signatures.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The deployment configuration in use.
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Processes a claim end to end: validates the processor, executes it
    /// against the claim, ABI-encodes the outputs and signs the message
    /// hash under the deployment's signature convention.
    ///
    /// Never yields a partial result: the first failure along the pipeline
    /// aborts the call.
    pub async fn process_claim(
        &self,
        claim: &ClaimData,
        processor: &Processor,
    ) -> Result<ProcessedClaimData, EnvelopeError> {
        let signature_type = self.deployment.signature_type;
        processor.validate()?;
        let provider_hash = claim.provider_hash()?;
        let values = execute_with_limits(processor, claim, &self.deployment.limits)?;

        let processor_digest =
            identity::processor_hash(processor, &self.deployment.processor_version)?;
        let processor_provider_hash =
            identity::processor_provider_hash(provider_hash, processor_digest);
        let message_hash =
            abi::message_hash(processor_provider_hash, &processor.outputs, &values)?;
        let digest = signing_digest(message_hash, signature_type);

        debug!(%processor_provider_hash, ?signature_type, "signing processed claim");
        let signature = self.signer.sign_hash(&digest).await?;

        Ok(ProcessedClaimData {
            processor_provider_hash,
            signature: signature.as_bytes().to_vec().into(),
            outputs: processor.outputs.clone(),
            values,
        })
    }
}

/// Recomputes the message hash of a processed claim and recovers the signer
/// address from its signature.
///
/// The caller compares the result against the expected attestor address;
/// any tampering with the hash, outputs or values shifts the recovered
/// address.
pub fn recover_attestor(
    processed: &ProcessedClaimData,
    signature_type: SignatureType,
) -> Result<Address, EnvelopeError> {
    let message_hash = abi::message_hash(
        processed.processor_provider_hash,
        &processed.outputs,
        &processed.values,
    )?;
    let digest = signing_digest(message_hash, signature_type);
    let signature = Signature::try_from(processed.signature.as_ref())?;
    Ok(signature.recover_address_from_prehash(&digest)?)
}

fn signing_digest(message_hash: B256, signature_type: SignatureType) -> B256 {
    match signature_type {
        SignatureType::EthPersonal => eip191_hash_message(message_hash),
        SignatureType::EthRaw => message_hash,
    }
}

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

//! The claim record consumed by the executor.
//!
//! Claims are produced by an upstream attestation pipeline and are immutable
//! here. The `context` and `parameters` fields carry JSON text; they are
//! parsed once so JSONPath queries can reach into them, and kept as raw
//! strings when they do not parse.

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

use crate::error::ClaimError;

/// An attested claim record.
///
/// The contents of this struct match the claim tuple the verifying contract
/// hashes on-chain; all fields except `context` and `parameters` are opaque
/// to the processor VM.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimData {
    /// Provider tag the claim was attested under.
    pub provider: String,
    /// JSON text of the request parameters.
    pub parameters: String,
    /// Hex address of the claim owner.
    pub owner: String,
    /// Claim creation time, seconds since the UNIX epoch.
    pub timestamp_s: u64,
    /// JSON text with attestation context. Must embed a `providerHash`
    /// field holding the 0x-prefixed keccak256 of the provider template.
    pub context: String,
    /// Hex identifier of the claim.
    pub identifier: String,
    /// Attestation epoch the claim was minted in.
    pub epoch: u64,
}

impl ClaimData {
    /// Builds the JSON tree that JSONPath extraction queries run against.
    ///
    /// `context` and `parameters` appear as parsed subtrees; when either is
    /// not valid JSON the raw string is retained, so `$.context` still
    /// resolves to something.
    pub fn query_root(&self) -> serde_json::Value {
        serde_json::json!({
            "provider": self.provider,
            "parameters": parse_or_raw(&self.parameters),
            "owner": self.owner,
            "timestampS": self.timestamp_s,
            "context": parse_or_raw(&self.context),
            "identifier": self.identifier,
            "epoch": self.epoch,
        })
    }

    /// Reads the mandatory `providerHash` out of the claim context.
    pub fn provider_hash(&self) -> Result<B256, ClaimError> {
        let context: serde_json::Value =
            serde_json::from_str(&self.context).map_err(|_| ClaimError::MissingProviderHash)?;
        let hash = context
            .get("providerHash")
            .and_then(serde_json::Value::as_str)
            .ok_or(ClaimError::MissingProviderHash)?;
        let hex = hash
            .strip_prefix("0x")
            .ok_or_else(|| ClaimError::MalformedProviderHash(hash.to_string()))?;
        hex.parse::<B256>().map_err(|_| ClaimError::MalformedProviderHash(hash.to_string()))
    }
}

fn parse_or_raw(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

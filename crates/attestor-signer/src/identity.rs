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

//! Identity hashing: the processor-provider hash is the on-chain whitelist
//! key binding a processor document to the provider template it may be used
//! with.

use alloy_primitives::{hex, keccak256, B256};
use attestor_processor::canonical::canonical_processor_json;
use attestor_processor::Processor;

/// keccak256 of the canonical processor JSON.
///
/// Documents without a `version` tag are hashed as if they carried
/// `default_version`, so clients that omit the tag agree with clients that
/// send it.
pub fn processor_hash(
    processor: &Processor,
    default_version: &str,
) -> Result<B256, serde_json::Error> {
    let canonical = if processor.version.is_some() {
        canonical_processor_json(processor)?
    } else {
        let mut tagged = processor.clone();
        tagged.version = Some(default_version.to_string());
        canonical_processor_json(&tagged)?
    };
    Ok(keccak256(canonical.as_bytes()))
}

/// keccak256 over the lowercase hex forms of the provider hash and the
/// processor hash, joined by a newline.
pub fn processor_provider_hash(provider_hash: B256, processor_hash: B256) -> B256 {
    let preimage =
        format!("0x{}\n0x{}", hex::encode(provider_hash), hex::encode(processor_hash));
    keccak256(preimage.as_bytes())
}

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

//! Signing envelope for processed claims.
//!
//! Takes a claim and a processor document through validation, execution,
//! EVM ABI encoding and ECDSA signing, producing a [`ProcessedClaimData`]
//! whose signature a contract can verify with `ecrecover`.

#![deny(missing_docs)]

pub mod abi;
pub mod config;
pub mod envelope;
pub mod error;
pub mod identity;

pub use config::{Deployment, SignatureType, DEFAULT_PROCESSOR_VERSION};
pub use envelope::{recover_attestor, Attestor, ProcessedClaimData};
pub use error::{EncodingError, EnvelopeError};

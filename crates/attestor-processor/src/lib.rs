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

//! A sandboxed VM for claim processors: declarative, deterministic JSON
//! documents that reduce an attested claim to an ordered vector of typed
//! string values.
//!
//! The pipeline is extract (JSONPath over the claim) → transform (a closed
//! catalogue of pure operators) → outputs (string coercion). Processors are
//! untrusted and must pass [`Processor::validate`] before execution;
//! execution is side-effect free and bounded by [`ExecutionLimits`].

#![deny(missing_docs)]

pub mod canonical;
pub mod claim;
pub mod condition;
pub mod error;
pub mod execute;
pub mod ops;
pub mod processor;
pub mod validate;
pub mod value;

pub use claim::ClaimData;
pub use condition::Condition;
pub use error::{ClaimError, ExecutionError, ProcessorInvalid, ValidationError};
pub use execute::{execute, execute_with_limits, ExecutionLimits};
pub use ops::Op;
pub use processor::{OutputSpec, Processor, TransformRule};
pub use value::Value;

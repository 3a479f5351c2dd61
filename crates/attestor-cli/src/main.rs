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

use std::path::{Path, PathBuf};

use alloy::primitives::B256;
use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context, Result};
use attestor_processor::{ClaimData, Processor};
use attestor_signer::{identity, Attestor, Deployment, SignatureType, DEFAULT_PROCESSOR_VERSION};
use clap::{Parser, Subcommand, ValueEnum};

/// Operator CLI for the attestor: validate processors, compute identity
/// hashes, and process-and-sign claims from files.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Statically validate a processor document.
    Validate {
        /// Path to the processor JSON document.
        processor: PathBuf,
    },
    /// Compute the identity hashes binding a processor to a provider.
    Identity {
        /// Path to the processor JSON document.
        processor: PathBuf,
        /// Provider template hash carried in claim contexts.
        #[clap(long, env)]
        provider_hash: B256,
    },
    /// Process a claim against a processor and sign the result.
    Process {
        /// Path to the processor JSON document.
        processor: PathBuf,
        /// Path to the claim JSON record.
        claim: PathBuf,
        /// Attestor private key used to sign the processed claim.
        #[clap(long, env)]
        private_key: PrivateKeySigner,
        /// Signature convention the verifying contract expects.
        #[clap(long, value_enum, default_value = "eth-personal")]
        signature_type: SignatureArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SignatureArg {
    /// EIP-191 personal-message prefix over the message hash.
    EthPersonal,
    /// ECDSA directly over the message hash.
    EthRaw,
}

impl From<SignatureArg> for SignatureType {
    fn from(arg: SignatureArg) -> Self {
        match arg {
            SignatureArg::EthPersonal => SignatureType::EthPersonal,
            SignatureArg::EthRaw => SignatureType::EthRaw,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    let args = MainArgs::parse();
    run(args).await
}

async fn run(args: MainArgs) -> Result<()> {
    match args.command {
        Command::Validate { processor } => {
            let processor = load_processor(&processor)?;
            processor.validate()?;
            println!("processor is valid");
        }
        Command::Identity { processor, provider_hash } => {
            let processor = load_processor(&processor)?;
            processor.validate()?;
            let digest = identity::processor_hash(&processor, DEFAULT_PROCESSOR_VERSION)?;
            let bound = identity::processor_provider_hash(provider_hash, digest);
            println!(
                "{}",
                serde_json::json!({
                    "processorHash": digest,
                    "processorProviderHash": bound,
                })
            );
        }
        Command::Process { processor, claim, private_key, signature_type } => {
            let processor = load_processor(&processor)?;
            let claim: ClaimData = serde_json::from_str(&read_file(&claim)?)
                .context("malformed claim record")?;
            let deployment =
                Deployment::default().with_signature_type(signature_type.into());
            let attestor = Attestor::new(private_key).with_deployment(deployment);
            let processed = attestor.process_claim(&claim, &processor).await?;
            println!("{}", serde_json::to_string_pretty(&processed)?);
        }
    }
    Ok(())
}

fn load_processor(path: &Path) -> Result<Processor> {
    Ok(Processor::from_json(&read_file(path)?)?)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

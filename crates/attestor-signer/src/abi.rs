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

//! EVM ABI encoding of processed-claim outputs.
//!
//! Output values leave the VM as strings; this module coerces each string
//! under its declared ABI type and produces the Solidity `abi.encode`
//! byte-exact encoding of the tuple `(processorProviderHash, ...values)`.
//! The verifying contract hashes the identical tuple, so any divergence
//! here breaks signature verification.

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Address, B256, I256, U256};
use attestor_processor::validate::is_recognized_evm_type;
use attestor_processor::{OutputSpec, Value};

use crate::error::EncodingError;

/// ABI-encodes `(processorProviderHash, ...values)` with the tuple type
/// `(bytes32, ...outputs[i].type)`, exactly as Solidity `abi.encode`.
pub fn encode_message(
    processor_provider_hash: B256,
    outputs: &[OutputSpec],
    values: &[String],
) -> Result<Vec<u8>, EncodingError> {
    if outputs.len() != values.len() {
        return Err(EncodingError::ArityMismatch {
            outputs: outputs.len(),
            values: values.len(),
        });
    }
    let mut encoded = Vec::with_capacity(values.len() + 1);
    encoded.push(DynSolValue::FixedBytes(processor_provider_hash, 32));
    for (output, value) in outputs.iter().zip(values) {
        let ty = parse_type(&output.r#type)?;
        encoded.push(coerce(&ty, value)?);
    }
    Ok(DynSolValue::Tuple(encoded).abi_encode_params())
}

/// keccak256 of the ABI-encoded message tuple; this is the digest the
/// attestor signs.
pub fn message_hash(
    processor_provider_hash: B256,
    outputs: &[OutputSpec],
    values: &[String],
) -> Result<B256, EncodingError> {
    Ok(keccak256(encode_message(processor_provider_hash, outputs, values)?))
}

/// Parses an output type tag, restricted to the recognised EVM set.
pub fn parse_type(ty: &str) -> Result<DynSolType, EncodingError> {
    if !is_recognized_evm_type(ty) {
        return Err(EncodingError::UnsupportedType(ty.to_string()));
    }
    DynSolType::parse(ty).map_err(|_| EncodingError::UnsupportedType(ty.to_string()))
}

/// Coerces the string form of an output value into its ABI value.
pub fn coerce(ty: &DynSolType, value: &str) -> Result<DynSolValue, EncodingError> {
    let invalid = |reason: String| EncodingError::InvalidValue {
        ty: ty.sol_type_name().into_owned(),
        value: value.to_string(),
        reason,
    };
    match ty {
        DynSolType::Address => value
            .parse::<Address>()
            .map(DynSolValue::Address)
            .map_err(|e| invalid(e.to_string())),
        DynSolType::Bool => match value {
            "true" => Ok(DynSolValue::Bool(true)),
            "false" => Ok(DynSolValue::Bool(false)),
            _ => Err(invalid("expected 'true' or 'false'".to_string())),
        },
        DynSolType::String => Ok(DynSolValue::String(value.to_string())),
        DynSolType::Bytes => alloy_primitives::hex::decode(value)
            .map(DynSolValue::Bytes)
            .map_err(|e| invalid(e.to_string())),
        DynSolType::FixedBytes(size) => {
            let bytes =
                alloy_primitives::hex::decode(value).map_err(|e| invalid(e.to_string()))?;
            if bytes.len() != *size {
                return Err(invalid(format!("expected {size} bytes, got {}", bytes.len())));
            }
            let mut word = B256::ZERO;
            word[..*size].copy_from_slice(&bytes);
            Ok(DynSolValue::FixedBytes(word, *size))
        }
        DynSolType::Uint(bits) => {
            let parsed = match value.strip_prefix("0x") {
                Some(hex) => U256::from_str_radix(hex, 16),
                None => U256::from_str_radix(value, 10),
            }
            .map_err(|e| invalid(e.to_string()))?;
            if parsed.bit_len() > *bits {
                return Err(invalid(format!("does not fit in {bits} bits")));
            }
            Ok(DynSolValue::Uint(parsed, *bits))
        }
        DynSolType::Int(bits) => {
            let parsed = I256::from_dec_str(value).map_err(|e| invalid(e.to_string()))?;
            let bound = U256::from(1) << (bits - 1);
            let in_range = if parsed.is_negative() {
                parsed.unsigned_abs() <= bound
            } else {
                parsed.unsigned_abs() < bound
            };
            if !in_range {
                return Err(invalid(format!("does not fit in {bits} bits")));
            }
            Ok(DynSolValue::Int(parsed, *bits))
        }
        DynSolType::Array(inner) => {
            let items: Vec<serde_json::Value> = serde_json::from_str(value)
                .map_err(|_| invalid("expected a JSON array".to_string()))?;
            items
                .iter()
                .map(|item| coerce(inner, &Value::from(item).safe_string()))
                .collect::<Result<Vec<_>, _>>()
                .map(DynSolValue::Array)
        }
        other => Err(EncodingError::UnsupportedType(other.sol_type_name().into_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, hex};

    fn spec(name: &str, ty: &str) -> OutputSpec {
        OutputSpec { name: name.into(), r#type: ty.into() }
    }

    #[test]
    fn coerces_the_full_type_set() {
        let addr = coerce(&DynSolType::Address, "0xc702b9950ba7b6ca5e3763ab5c6a2e4b2b763bfa");
        assert_eq!(
            addr.unwrap(),
            DynSolValue::Address(address!("c702b9950ba7b6ca5e3763ab5c6a2e4b2b763bfa")),
        );
        assert_eq!(coerce(&DynSolType::Bool, "true").unwrap(), DynSolValue::Bool(true));
        assert_eq!(
            coerce(&DynSolType::Uint(256), "100").unwrap(),
            DynSolValue::Uint(U256::from(100), 256),
        );
        assert_eq!(
            coerce(&DynSolType::Int(256), "-5").unwrap(),
            DynSolValue::Int(I256::from_dec_str("-5").unwrap(), 256),
        );
        assert_eq!(
            coerce(&DynSolType::Bytes, "0xdeadbeef").unwrap(),
            DynSolValue::Bytes(hex::decode("deadbeef").unwrap()),
        );
        assert_eq!(
            coerce(&DynSolType::String, "as-is").unwrap(),
            DynSolValue::String("as-is".into()),
        );
    }

    #[test]
    fn fixed_bytes_require_exact_length() {
        let word = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        assert_eq!(
            coerce(&DynSolType::FixedBytes(32), &format!("0x{}", hex::encode(word))).unwrap(),
            DynSolValue::FixedBytes(word, 32),
        );
        assert!(coerce(&DynSolType::FixedBytes(32), "0x1111").is_err());
        assert!(coerce(&DynSolType::FixedBytes(4), "0xdeadbeefff").is_err());
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert!(coerce(&DynSolType::Uint(8), "256").is_err());
        assert!(coerce(&DynSolType::Uint(8), "255").is_ok());
        assert!(coerce(&DynSolType::Int(8), "-129").is_err());
        assert!(coerce(&DynSolType::Int(8), "-128").is_ok());
        assert!(coerce(&DynSolType::Int(8), "128").is_err());
        assert!(coerce(&DynSolType::Uint(256), "-1").is_err());
    }

    #[test]
    fn arrays_parse_from_json_text() {
        let out = coerce(&DynSolType::Array(Box::new(DynSolType::Uint(256))), r#"["1","2",3]"#);
        assert_eq!(
            out.unwrap(),
            DynSolValue::Array(vec![
                DynSolValue::Uint(U256::from(1), 256),
                DynSolValue::Uint(U256::from(2), 256),
                DynSolValue::Uint(U256::from(3), 256),
            ]),
        );
        assert!(coerce(&DynSolType::Array(Box::new(DynSolType::Uint(256))), "not json").is_err());
    }

    #[test]
    fn unsupported_types_are_rejected_before_parsing() {
        assert!(matches!(parse_type("tuple"), Err(EncodingError::UnsupportedType(_))));
        assert!(matches!(parse_type("uint7"), Err(EncodingError::UnsupportedType(_))));
        assert!(parse_type("uint64[]").is_ok());
    }

    #[test]
    fn encoding_matches_solidity_abi_encode() {
        // abi.encode(bytes32(0x11..11), uint256(100)) is two static words
        let pph = b256!("1111111111111111111111111111111111111111111111111111111111111111");
        let encoded =
            encode_message(pph, &[spec("amount", "uint256")], &["100".to_string()]).unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(&encoded[..32], pph.as_slice());
        assert_eq!(U256::from_be_slice(&encoded[32..]), U256::from(100));
    }

    #[test]
    fn encoding_round_trips_through_abi_decode() {
        let pph = b256!("2222222222222222222222222222222222222222222222222222222222222222");
        let outputs =
            [spec("who", "address"), spec("amount", "uint256"), spec("memo", "string")];
        let values = [
            "0xc702b9950ba7b6ca5e3763ab5c6a2e4b2b763bfa".to_string(),
            "100".to_string(),
            "thanks".to_string(),
        ];
        let encoded = encode_message(pph, &outputs, &values).unwrap();

        let tuple = DynSolType::Tuple(vec![
            DynSolType::FixedBytes(32),
            DynSolType::Address,
            DynSolType::Uint(256),
            DynSolType::String,
        ]);
        let decoded = tuple.abi_decode_params(&encoded).unwrap();
        let DynSolValue::Tuple(items) = decoded else { panic!("expected tuple") };
        assert_eq!(items[0], DynSolValue::FixedBytes(pph, 32));
        assert_eq!(
            items[1],
            DynSolValue::Address(address!("c702b9950ba7b6ca5e3763ab5c6a2e4b2b763bfa")),
        );
        assert_eq!(items[2], DynSolValue::Uint(U256::from(100), 256));
        assert_eq!(items[3], DynSolValue::String("thanks".into()));
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let pph = B256::ZERO;
        let err = encode_message(pph, &[spec("a", "uint256")], &[]).unwrap_err();
        assert!(matches!(err, EncodingError::ArityMismatch { outputs: 1, values: 0 }));
    }

    #[test]
    fn any_value_change_changes_the_message_hash() {
        let pph = B256::ZERO;
        let outputs = [spec("amount", "uint256")];
        let a = message_hash(pph, &outputs, &["100".to_string()]).unwrap();
        let b = message_hash(pph, &outputs, &["101".to_string()]).unwrap();
        assert_ne!(a, b);
    }
}

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

//! The `keccak256` and `sha256` operators.

use std::borrow::Cow;

use sha2::{Digest as _, Sha256};

use crate::value::Value;

pub(super) fn keccak256(value: &Value) -> Value {
    let digest = alloy_primitives::keccak256(preimage(value));
    Value::String(format!("0x{}", alloy_primitives::hex::encode(digest)))
}

pub(super) fn sha256(value: &Value) -> Value {
    let digest = Sha256::digest(preimage(value));
    Value::String(format!("0x{}", alloy_primitives::hex::encode(digest)))
}

// Byte values hash as-is; everything else hashes its UTF-8 string form.
fn preimage(value: &Value) -> Cow<'_, [u8]> {
    match value {
        Value::Bytes(bytes) => Cow::Borrowed(bytes.as_slice()),
        other => Cow::Owned(other.safe_string().into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak_of_string_form() {
        let out = keccak256(&Value::String("hello".into()));
        assert_eq!(
            out,
            Value::String(
                "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8".into()
            ),
        );
    }

    #[test]
    fn keccak_of_raw_bytes_matches_string_bytes() {
        let from_bytes = keccak256(&Value::Bytes(b"hello".to_vec()));
        let from_string = keccak256(&Value::String("hello".into()));
        assert_eq!(from_bytes, from_string);
    }

    #[test]
    fn sha256_of_string_form() {
        let out = sha256(&Value::String("abc".into()));
        assert_eq!(
            out,
            Value::String(
                "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad".into()
            ),
        );
    }

    #[test]
    fn hex_is_lowercase_and_sixty_four_chars() {
        let Value::String(s) = keccak256(&Value::Null) else { panic!() };
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
        assert_eq!(s, s.to_lowercase());
    }
}

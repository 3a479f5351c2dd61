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

//! Canonical JSON serialization, used only for processor identity hashing.
//!
//! Rules: object keys in lexicographic (byte) order at every level, arrays
//! in their given order, no whitespace, minimal string escaping, numbers as
//! `serde_json` renders them. Two semantically equal documents serialize to
//! identical bytes.

use crate::processor::Processor;

/// Serializes a JSON value in canonical form.
pub fn to_canonical_json(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Serializes a processor document in canonical form.
pub fn canonical_processor_json(processor: &Processor) -> Result<String, serde_json::Error> {
    Ok(to_canonical_json(&serde_json::to_value(processor)?))
}

fn write_value(out: &mut String, value: &serde_json::Value) {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&n.to_string()),
        serde_json::Value::String(s) => write_string(out, s),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        serde_json::Value::Object(entries) => {
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, &entries[key.as_str()]);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    // serde_json applies exactly the minimal escape set
    out.push_str(&serde_json::to_string(s).expect("string serialization is infallible"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keys_sort_at_every_level() {
        let v = json!({"b": {"y": 1, "x": 2}, "a": [3, {"q": 4, "p": 5}]});
        assert_eq!(to_canonical_json(&v), r#"{"a":[3,{"p":5,"q":4}],"b":{"x":2,"y":1}}"#);
    }

    #[test]
    fn arrays_keep_their_order() {
        let v = json!([3, 1, 2]);
        assert_eq!(to_canonical_json(&v), "[3,1,2]");
    }

    #[test]
    fn strings_escape_minimally() {
        let v = json!({"k": "a\"b\\c\nd"});
        assert_eq!(to_canonical_json(&v), r#"{"k":"a\"b\\c\nd"}"#);
    }

    #[test]
    fn key_order_in_the_source_is_irrelevant() {
        let a: serde_json::Value = serde_json::from_str(r#"{"x": 1, "y": 2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"y": 2, "x": 1}"#).unwrap();
        assert_eq!(to_canonical_json(&a), to_canonical_json(&b));
    }

    #[test]
    fn stable_across_runs() {
        let p = Processor::from_json(
            r#"{"extract": {"b": "$.b", "a": "$.a"}, "outputs": [{"name": "a", "type": "string"}]}"#,
        )
        .unwrap();
        let first = canonical_processor_json(&p).unwrap();
        let second = canonical_processor_json(&p).unwrap();
        assert_eq!(first, second);
    }
}

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

//! End-to-end executor scenarios over realistic payment-claim processors.

use attestor_processor::{execute, ClaimData, ExecutionError, Processor};
use serde_json::json;

const RECEIVER: &str = "0xc702b9950ba7b6ca5e3763ab5c6a2e4b2b763bfa";

fn claim_with_context(context: serde_json::Value) -> ClaimData {
    ClaimData {
        provider: "http".into(),
        parameters: r#"{"method":"GET"}"#.into(),
        owner: "0x0000000000000000000000000000000000000001".into(),
        timestamp_s: 1741286205,
        context: context.to_string(),
        identifier: "0x3d4b2cfb9f84885e0ed69e565d7a52bd0b0f30ba57bdcf4ee82f3ff1c9f6f6e5".into(),
        epoch: 1,
    }
}

fn processor(raw: serde_json::Value) -> Processor {
    let processor = Processor::from_json(&raw.to_string()).expect("processor should parse");
    processor.validate().expect("processor should validate");
    processor
}

#[test]
fn venmo_style_payment() {
    let processor = processor(json!({
        "extract": {
            "amount": "$.context.extractedParameters.amount",
            "date": "$.context.extractedParameters.date",
            "receiverId": "$.context.extractedParameters.receiverId",
        },
        "transform": {
            "amountInCents": {
                "input": "amount",
                "ops": [{"type": "math", "expression": "* 100"}],
            },
            "timestamp": {"input": "date", "ops": ["parseTimestamp"]},
        },
        "outputs": [
            {"name": "receiverId", "type": "address"},
            {"name": "amountInCents", "type": "uint256"},
            {"name": "timestamp", "type": "uint256"},
        ],
    }));
    let claim = claim_with_context(json!({
        "extractedParameters": {
            "amount": "1.00",
            "date": "2025-03-06T18:36:45",
            "receiverId": RECEIVER,
        },
    }));

    let values = execute(&processor, &claim).unwrap();
    assert_eq!(values, [RECEIVER, "100", "1741286205000"]);
}

#[test]
fn mercadopago_style_concat() {
    let processor = processor(json!({
        "extract": {
            "amt": "$.context.extractedParameters.amt",
            "cents": "$.context.extractedParameters.cents",
        },
        "transform": {
            "scaledAmount": {"inputs": ["amt", "cents"], "ops": ["concat"]},
            "timestamp": {
                "ops": [
                    {"type": "constant", "value": "2025-03-21T19:54:05.000Z"},
                    "parseTimestamp",
                ],
            },
        },
        "outputs": [
            {"name": "scaledAmount", "type": "uint256"},
            {"name": "timestamp", "type": "uint256"},
        ],
    }));
    let claim = claim_with_context(json!({
        "extractedParameters": {"amt": "1", "cents": "00"},
    }));

    let values = execute(&processor, &claim).unwrap();
    assert_eq!(values, ["100", "1742586845000"]);
}

fn currency_scaling_processor() -> Processor {
    processor(json!({
        "extract": {
            "amount": "$.context.extractedParameters.amount",
            "currency": "$.context.extractedParameters.currency",
        },
        "transform": {
            "scaledAmount": {
                "input": "amount",
                "ops": [{
                    "type": "conditionalOn",
                    "checkField": "currency",
                    "if": {"or": [{"eq": "JPY"}, {"eq": "KRW"}]},
                    "then": [],
                    "else": [{"type": "math", "expression": "/ 100"}],
                }],
            },
        },
        "outputs": [{"name": "scaledAmount", "type": "string"}],
    }))
}

#[test]
fn currency_aware_scaling_takes_the_then_branch() {
    let claim = claim_with_context(json!({
        "extractedParameters": {"amount": "1000", "currency": "JPY"},
    }));
    let values = execute(&currency_scaling_processor(), &claim).unwrap();
    assert_eq!(values, ["1000"]);
}

#[test]
fn currency_aware_scaling_takes_the_else_branch() {
    let claim = claim_with_context(json!({
        "extractedParameters": {"amount": "1000", "currency": "USD"},
    }));
    let values = execute(&currency_scaling_processor(), &claim).unwrap();
    assert_eq!(values, ["10"]);
}

#[test]
fn failed_assertion_aborts_without_output() {
    let processor = processor(json!({
        "extract": {"status": "$.context.extractedParameters.status"},
        "transform": {
            "checkedStatus": {
                "input": "status",
                "ops": [{"type": "assertEquals", "expected": "approved"}],
            },
        },
        "outputs": [{"name": "checkedStatus", "type": "string"}],
    }));
    let claim = claim_with_context(json!({
        "extractedParameters": {"status": "pending"},
    }));

    let err = execute(&processor, &claim).unwrap_err();
    let ExecutionError::OpFailure { op, .. } = err else {
        panic!("expected an op failure, got {err:?}");
    };
    assert_eq!(op, "assertEquals");
}

#[test]
fn execution_is_deterministic() {
    let processor = currency_scaling_processor();
    let claim = claim_with_context(json!({
        "extractedParameters": {"amount": "1000", "currency": "EUR"},
    }));
    let first = execute(&processor, &claim).unwrap();
    let second = execute(&processor, &claim).unwrap();
    assert_eq!(first, second);
}

#[test]
fn output_arity_matches_the_declaration() {
    let processor = processor(json!({
        "extract": {
            "a": "$.context.a",
            "b": "$.context.b",
            "c": "$.context.c",
        },
        "outputs": [
            {"name": "a", "type": "string"},
            {"name": "b", "type": "string"},
            {"name": "c", "type": "string"},
        ],
    }));
    let claim = claim_with_context(json!({"a": 1, "b": true, "c": "three"}));
    let values = execute(&processor, &claim).unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(values, ["1", "true", "three"]);
}

#[test]
fn parameters_are_reachable_by_jsonpath() {
    let processor = processor(json!({
        "extract": {"method": "$.parameters.method"},
        "outputs": [{"name": "method", "type": "string"}],
    }));
    let claim = claim_with_context(json!({}));
    assert_eq!(execute(&processor, &claim).unwrap(), ["GET"]);
}

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

//! Static validation of processor documents.
//!
//! Runs before any execution and is strict enough that a validated
//! processor can only fail at runtime on input-value shape issues: every
//! name reference resolves, every JSONPath parses, every output type is in
//! the recognised EVM set, and `conditionalOn` never nests.

use std::collections::HashSet;

use serde_json_path::JsonPath;

use crate::error::{ProcessorInvalid, ValidationError};
use crate::ops::Op;
use crate::processor::Processor;

/// Validates a processor document, returning all findings on failure.
pub fn validate(processor: &Processor) -> Result<(), ProcessorInvalid> {
    let errors = check(processor);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ProcessorInvalid { errors })
    }
}

/// Collects every validation finding for a processor document, in document
/// order.
pub fn check(processor: &Processor) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if processor.legacy_output.is_some() {
        errors.push(ValidationError::new(
            "output",
            "the legacy 'output' list is not supported; declare 'outputs' entries with name and type",
        ));
    }

    if processor.extract.is_empty() {
        errors.push(ValidationError::new("extract", "at least one extraction is required"));
    }
    for (name, path) in &processor.extract {
        if !is_identifier(name) {
            errors.push(ValidationError::new(
                format!("extract.{name}"),
                format!("'{name}' is not a valid variable name"),
            ));
        }
        if let Err(e) = JsonPath::parse(path) {
            errors.push(ValidationError::new(
                format!("extract.{name}"),
                format!("invalid JSONPath '{path}': {e}"),
            ));
        }
    }

    // Scope grows as transforms are declared; a transform may shadow an
    // extract, so extracts are all in scope from the start.
    let mut scope: HashSet<&str> = processor.extract.keys().map(String::as_str).collect();
    for (name, rule) in &processor.transform {
        let loc = format!("transform.{name}");
        if !is_identifier(name) {
            errors.push(ValidationError::new(
                loc.clone(),
                format!("'{name}' is not a valid variable name"),
            ));
        }
        match (&rule.input, &rule.inputs) {
            (Some(_), Some(_)) => errors.push(ValidationError::new(
                loc.clone(),
                "'input' and 'inputs' are mutually exclusive",
            )),
            (None, None) => {
                if !matches!(rule.ops.first(), Some(Op::Constant { .. })) {
                    errors.push(ValidationError::new(
                        loc.clone(),
                        "a rule without 'input' or 'inputs' must start with a constant op",
                    ));
                }
            }
            (Some(input), None) => {
                if !scope.contains(input.as_str()) {
                    errors.push(ValidationError::new(
                        format!("{loc}.input"),
                        format!("'{input}' is not defined at this point"),
                    ));
                }
            }
            (None, Some(inputs)) => {
                for (i, input) in inputs.iter().enumerate() {
                    if !scope.contains(input.as_str()) {
                        errors.push(ValidationError::new(
                            format!("{loc}.inputs[{i}]"),
                            format!("'{input}' is not defined at this point"),
                        ));
                    }
                }
            }
        }
        for (i, op) in rule.ops.iter().enumerate() {
            check_op(op, &format!("{loc}.ops[{i}]"), &scope, false, &mut errors);
        }
        scope.insert(name.as_str());
    }

    if processor.outputs.is_empty() {
        errors.push(ValidationError::new("outputs", "at least one output is required"));
    }
    let mut seen = HashSet::new();
    for (i, output) in processor.outputs.iter().enumerate() {
        let loc = format!("outputs[{i}]");
        if output.name.is_empty() {
            errors.push(ValidationError::new(loc.clone(), "missing output name"));
        } else {
            if !scope.contains(output.name.as_str()) {
                errors.push(ValidationError::new(
                    format!("{loc}.name"),
                    format!(
                        "'{}' does not resolve to an extracted or transformed variable",
                        output.name
                    ),
                ));
            }
            if !seen.insert(output.name.as_str()) {
                errors.push(ValidationError::new(
                    format!("{loc}.name"),
                    format!("duplicate output name '{}'", output.name),
                ));
            }
        }
        if output.r#type.is_empty() {
            errors.push(ValidationError::new(loc, "missing output type"));
        } else if !is_recognized_evm_type(&output.r#type) {
            errors.push(ValidationError::new(
                format!("{loc}.type"),
                format!("'{}' is not a recognised EVM type", output.r#type),
            ));
        }
    }

    errors
}

fn check_op(
    op: &Op,
    loc: &str,
    scope: &HashSet<&str>,
    inside_branch: bool,
    errors: &mut Vec<ValidationError>,
) {
    match op {
        Op::Replace { pattern, .. } if pattern.is_empty() => {
            errors.push(ValidationError::new(
                format!("{loc}.pattern"),
                "pattern must not be empty",
            ));
        }
        Op::ConditionalOn { check_field, then, otherwise, .. } => {
            if inside_branch {
                errors.push(ValidationError::new(
                    loc,
                    "conditionalOn may not appear inside another conditionalOn",
                ));
            }
            if !scope.contains(check_field.as_str()) {
                errors.push(ValidationError::new(
                    format!("{loc}.checkField"),
                    format!("'{check_field}' is not defined at this point"),
                ));
            }
            for (i, sub) in then.iter().enumerate() {
                check_op(sub, &format!("{loc}.then[{i}]"), scope, true, errors);
            }
            for (i, sub) in otherwise.iter().enumerate() {
                check_op(sub, &format!("{loc}.else[{i}]"), scope, true, errors);
            }
        }
        _ => {}
    }
}

/// Whether a string is a valid variable name: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a type tag is in the recognised EVM ABI set: `address`, `bool`,
/// `string`, `bytes`, `bytes1..32`, `uintN`/`intN` for N a multiple of 8 up
/// to 256, or any of those with one trailing `[]`.
pub fn is_recognized_evm_type(ty: &str) -> bool {
    let base = ty.strip_suffix("[]").unwrap_or(ty);
    match base {
        "address" | "bool" | "string" | "bytes" => true,
        _ => {
            if let Some(size) = base.strip_prefix("bytes") {
                return size.parse::<u8>().is_ok_and(|n| (1..=32).contains(&n));
            }
            if let Some(bits) = base.strip_prefix("uint") {
                return is_valid_bits(bits);
            }
            if let Some(bits) = base.strip_prefix("int") {
                return is_valid_bits(bits);
            }
            false
        }
    }
}

fn is_valid_bits(bits: &str) -> bool {
    bits.parse::<u16>().is_ok_and(|n| (8..=256).contains(&n) && n % 8 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn processor(raw: serde_json::Value) -> Processor {
        Processor::from_json(&raw.to_string()).unwrap()
    }

    fn messages(raw: serde_json::Value) -> Vec<String> {
        check(&processor(raw)).into_iter().map(|e| format!("{e}")).collect()
    }

    #[test]
    fn a_well_formed_processor_passes() {
        let p = processor(json!({
            "extract": {"amount": "$.context.extractedParameters.amount"},
            "transform": {
                "cents": {"input": "amount", "ops": [{"type": "math", "expression": "* 100"}]},
            },
            "outputs": [{"name": "cents", "type": "uint256"}],
        }));
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn empty_extract_is_rejected() {
        let errs = messages(json!({"outputs": [{"name": "x", "type": "string"}]}));
        assert!(errs.iter().any(|e| e.contains("at least one extraction")));
    }

    #[test]
    fn bad_variable_names_are_rejected() {
        let errs = messages(json!({
            "extract": {"1bad": "$.x"},
            "outputs": [{"name": "1bad", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("not a valid variable name")));
    }

    #[test]
    fn bad_jsonpath_is_rejected() {
        let errs = messages(json!({
            "extract": {"x": "context.amount"},
            "outputs": [{"name": "x", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("invalid JSONPath")));
    }

    #[test]
    fn input_and_inputs_are_mutually_exclusive() {
        let errs = messages(json!({
            "extract": {"a": "$.a", "b": "$.b"},
            "transform": {"c": {"input": "a", "inputs": ["a", "b"], "ops": ["trim"]}},
            "outputs": [{"name": "c", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("mutually exclusive")));
    }

    #[test]
    fn sourceless_rule_must_start_with_constant() {
        let errs = messages(json!({
            "extract": {"a": "$.a"},
            "transform": {"c": {"ops": ["trim"]}},
            "outputs": [{"name": "c", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("must start with a constant")));

        let ok = processor(json!({
            "extract": {"a": "$.a"},
            "transform": {"c": {"ops": [{"type": "constant", "value": "1"}, "trim"]}},
            "outputs": [{"name": "c", "type": "string"}],
        }));
        assert!(validate(&ok).is_ok());
    }

    #[test]
    fn references_respect_declaration_order() {
        // d reads c before c is declared
        let errs = messages(json!({
            "extract": {"a": "$.a"},
            "transform": {
                "d": {"input": "c", "ops": ["trim"]},
                "c": {"input": "a", "ops": ["trim"]},
            },
            "outputs": [{"name": "d", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("'c' is not defined at this point")));
    }

    #[test]
    fn transform_may_shadow_an_extract() {
        let p = processor(json!({
            "extract": {"amount": "$.amount"},
            "transform": {"amount": {"input": "amount", "ops": ["trim"]}},
            "outputs": [{"name": "amount", "type": "string"}],
        }));
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn empty_replace_pattern_is_rejected() {
        let errs = messages(json!({
            "extract": {"a": "$.a"},
            "transform": {
                "b": {"input": "a", "ops": [{"type": "replace", "pattern": ""}]},
            },
            "outputs": [{"name": "b", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("pattern must not be empty")));
    }

    #[test]
    fn conditional_on_nesting_is_rejected() {
        let errs = messages(json!({
            "extract": {"a": "$.a", "flag": "$.flag"},
            "transform": {
                "b": {"input": "a", "ops": [{
                    "type": "conditionalOn",
                    "checkField": "flag",
                    "if": {"eq": "y"},
                    "then": [{
                        "type": "conditionalOn",
                        "checkField": "flag",
                        "if": {"eq": "z"},
                        "then": [],
                    }],
                }]},
            },
            "outputs": [{"name": "b", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("may not appear inside another")));
    }

    #[test]
    fn conditional_on_check_field_must_resolve() {
        let errs = messages(json!({
            "extract": {"a": "$.a"},
            "transform": {
                "b": {"input": "a", "ops": [{
                    "type": "conditionalOn",
                    "checkField": "missing",
                    "if": {"eq": "y"},
                    "then": [],
                }]},
            },
            "outputs": [{"name": "b", "type": "string"}],
        }));
        assert!(errs.iter().any(|e| e.contains("'missing' is not defined")));
    }

    #[test]
    fn outputs_must_resolve_and_be_unique() {
        let errs = messages(json!({
            "extract": {"a": "$.a"},
            "outputs": [
                {"name": "a", "type": "string"},
                {"name": "a", "type": "string"},
                {"name": "ghost", "type": "string"},
            ],
        }));
        assert!(errs.iter().any(|e| e.contains("duplicate output name 'a'")));
        assert!(errs.iter().any(|e| e.contains("'ghost' does not resolve")));
    }

    #[test]
    fn unrecognised_evm_types_are_rejected() {
        let errs = messages(json!({
            "extract": {"a": "$.a"},
            "outputs": [{"name": "a", "type": "uint7"}],
        }));
        assert!(errs.iter().any(|e| e.contains("not a recognised EVM type")));
    }

    #[test]
    fn evm_type_grammar() {
        for ty in ["address", "bool", "string", "bytes", "bytes1", "bytes32", "uint8", "uint256", "int256", "uint256[]", "address[]", "bytes32[]"] {
            assert!(is_recognized_evm_type(ty), "{ty} should be recognised");
        }
        for ty in ["uint", "int", "uint7", "uint264", "bytes0", "bytes33", "function", "tuple", "uint256[2]", ""] {
            assert!(!is_recognized_evm_type(ty), "{ty} should be rejected");
        }
    }

    #[test]
    fn identifier_grammar() {
        assert!(is_identifier("_private"));
        assert!(is_identifier("camelCase9"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("kebab-case"));
        assert!(!is_identifier(""));
    }
}

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

//! The `math` operator: `<op> <number>` arithmetic on the pipeline value.

use crate::error::ExecutionError;
use crate::value::Value;

// Largest integer exactly representable in an f64; results beyond it fail.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub(super) fn eval(value: &Value, expression: &str) -> Result<Value, ExecutionError> {
    let expr = expression.trim();
    let mut chars = expr.chars();
    let operator = chars
        .next()
        .ok_or_else(|| ExecutionError::op("math", "empty expression"))?;
    if !matches!(operator, '+' | '-' | '*' | '/') {
        return Err(ExecutionError::op(
            "math",
            format!("expression must start with one of + - * /, got '{operator}'"),
        ));
    }
    let operand: f64 = chars.as_str().trim().parse().map_err(|_| {
        ExecutionError::op("math", format!("invalid operand in expression '{expr}'"))
    })?;
    let subject = value.as_number().ok_or_else(|| {
        ExecutionError::op("math", format!("non-numeric input '{}'", value.safe_string()))
    })?;

    let result = match operator {
        '+' => subject + operand,
        '-' => subject - operand,
        '*' => subject * operand,
        '/' => {
            if operand == 0.0 {
                return Err(ExecutionError::op("math", "division by zero"));
            }
            subject / operand
        }
        _ => unreachable!(),
    };

    if !result.is_finite() || result.abs() > MAX_SAFE_INTEGER {
        return Err(ExecutionError::op(
            "math",
            format!("result {result} is outside the safe integer range"),
        ));
    }
    Ok(Value::String(format_number(result)))
}

// Renders without a fractional part when the result is integral.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::String(text.into())
    }

    #[test]
    fn scales_amounts() {
        assert_eq!(eval(&s("1.00"), "* 100").unwrap(), s("100"));
        assert_eq!(eval(&s("1000"), "/100").unwrap(), s("10"));
        assert_eq!(eval(&Value::Int(7), "+ 3").unwrap(), s("10"));
        assert_eq!(eval(&s("10"), "- 2.5").unwrap(), s("7.5"));
    }

    #[test]
    fn non_numeric_input_fails() {
        assert!(eval(&s("abc"), "* 2").is_err());
        assert!(eval(&Value::Null, "* 2").is_err());
    }

    #[test]
    fn division_by_zero_fails() {
        assert!(eval(&s("1"), "/ 0").is_err());
    }

    #[test]
    fn unsafe_results_fail() {
        assert!(eval(&s("9007199254740991"), "* 2").is_err());
    }

    #[test]
    fn malformed_expressions_fail() {
        assert!(eval(&s("1"), "% 2").is_err());
        assert!(eval(&s("1"), "*").is_err());
        assert!(eval(&s("1"), "").is_err());
    }
}

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

//! The `substring` and `replace` operators.

use regex::Regex;

use crate::error::ExecutionError;
use crate::value::Value;

// A pattern starting with one of these is compiled as a regex even without
// the /…/ wrapping. This is the legacy detection rule and is part of the
// wire format.
const REGEX_LEADERS: &[char] = &['[', '\\', '^', '$', '.', '|', '?', '*', '+', '(', ')'];

pub(super) fn substring(value: &Value, start: u64, end: Option<u64>) -> Result<Value, ExecutionError> {
    let chars: Vec<char> = value.safe_string().chars().collect();
    let mut a = start as usize;
    let mut b = end.map(|e| e as usize).unwrap_or(chars.len());
    if b < a {
        std::mem::swap(&mut a, &mut b);
    }
    let a = a.min(chars.len());
    let b = b.min(chars.len());
    Ok(Value::String(chars[a..b].iter().collect()))
}

pub(super) fn replace(
    value: &Value,
    pattern: &str,
    replacement: &str,
    global: bool,
) -> Result<Value, ExecutionError> {
    let subject = value.safe_string();
    let replaced = if pattern.len() >= 2 && pattern.starts_with('/') && pattern.ends_with('/') {
        regex_replace(&subject, &pattern[1..pattern.len() - 1], replacement)?
    } else if pattern.starts_with(REGEX_LEADERS) {
        regex_replace(&subject, pattern, replacement)?
    } else if global {
        subject.replace(pattern, replacement)
    } else {
        subject.replacen(pattern, replacement, 1)
    };
    Ok(Value::String(replaced))
}

fn regex_replace(subject: &str, pattern: &str, replacement: &str) -> Result<String, ExecutionError> {
    let re = Regex::new(pattern)
        .map_err(|e| ExecutionError::op("replace", format!("invalid regex '{pattern}': {e}")))?;
    Ok(re.replace_all(subject, replacement).into_owned())
}

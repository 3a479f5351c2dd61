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

//! The `parseTimestamp` operator.
//!
//! Accepted input surfaces, tried in order:
//! 1. an integer (epoch seconds, or milliseconds when above 10^10),
//! 2. ISO 8601 / RFC 3339, with or without fractional seconds or offset
//!    (offset-less inputs are taken as UTC),
//! 3. `YYYY-MM-DD HH:MM:SS` (the first space is treated as the `T`),
//! 4. `YYYY-MM-DD` (midnight UTC),
//! 5. `MM/DD/YYYY` (midnight UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::ExecutionError;
use crate::value::Value;

const ISO_NO_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub(super) fn parse(value: &Value, format: Option<&str>) -> Result<Value, ExecutionError> {
    let raw = value.safe_string();
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ExecutionError::op("parseTimestamp", "empty input"));
    }
    if let Some(pattern) = format {
        let re = Regex::new(pattern).map_err(|e| {
            ExecutionError::op("parseTimestamp", format!("invalid format regex: {e}"))
        })?;
        if !re.is_match(raw) {
            return Err(ExecutionError::op(
                "parseTimestamp",
                format!("input '{raw}' does not match the expected format"),
            ));
        }
    }
    let millis = parse_millis(raw).ok_or_else(|| {
        ExecutionError::op("parseTimestamp", format!("unrecognized timestamp '{raw}'"))
    })?;
    Ok(Value::String(millis.to_string()))
}

fn parse_millis(raw: &str) -> Option<i64> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(if n > 10_000_000_000 { n } else { n.checked_mul(1000)? });
    }
    if let Some(millis) = parse_iso(raw) {
        return Some(millis);
    }
    if raw.contains(' ') {
        if let Some(millis) = parse_iso(&raw.replacen(' ', "T", 1)) {
            return Some(millis);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

fn parse_iso(raw: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(raw, ISO_NO_OFFSET)
        .ok()
        .map(|naive| naive.and_utc().timestamp_millis())
}

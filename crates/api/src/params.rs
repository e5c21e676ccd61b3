// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query string to [`SwapFilters`] conversion
//!
//! Two modes share the recognised keys of the payload validator (camelCase and
//! PascalCase spellings):
//!
//! - [`extract_query_params`] never fails. Integers are read with a leading-digits
//!   prefix (`"12abc"` is 12) and anything unreadable becomes a
//!   [`ParsedParam::Malformed`] filter that matches no record.
//! - [`extract_query_params_strict`] requires every value to parse completely and
//!   rejects unknown keys.

use std::collections::HashMap;

use shared_types::{ParsedParam, SwapFilters};
use thiserror::Error;

use crate::validation::{Field, ValidationError, Violation, parse_date, parse_integer_str};

/// A query string rejected in strict mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid query parameters: {reason}")]
pub struct ExtractError {
    reason: String,
}

impl ExtractError {
    fn unknown_key(key: &str) -> Self {
        Self {
            reason: format!("\"{key}\" is not allowed"),
        }
    }
}

impl From<ValidationError> for ExtractError {
    fn from(error: ValidationError) -> Self {
        Self {
            reason: error.message().to_string(),
        }
    }
}

/// Build filters from raw query parameters, tolerating malformed values
///
/// When a field is sent under several spellings, the first non-empty one in alias
/// order is used.
pub fn extract_query_params(raw: &HashMap<String, String>) -> SwapFilters {
    let mut filters = SwapFilters::default();

    for field in Field::ALL {
        let Some(value) = field
            .aliases()
            .iter()
            .filter_map(|alias| raw.get(*alias))
            .map(|value| value.as_str().trim())
            .find(|value| !value.is_empty())
        else {
            continue;
        };

        match field {
            Field::SwapCd => filters.swap_cd = Some(parse_int_prefix(value)),
            Field::Term => filters.term = Some(parse_int_prefix(value)),
            Field::Brand => filters.brand = Some(value.to_string()),
            Field::Channel => filters.channel = Some(value.to_string()),
            Field::StartDt => filters.start_date = Some(lenient_date(value)),
            Field::EndDt => filters.end_date = Some(lenient_date(value)),
        }
    }

    filters
}

/// Build filters from raw query parameters, failing on the first bad key or value
///
/// Values are checked in field order, then unknown keys in name order. An empty
/// value is a violation, not an absent filter.
pub fn extract_query_params_strict(
    raw: &HashMap<String, String>,
) -> Result<SwapFilters, ExtractError> {
    let mut filters = SwapFilters::default();

    for field in Field::ALL {
        for alias in field.aliases() {
            let Some(value) = raw.get(*alias) else {
                continue;
            };
            apply_strict(&mut filters, field, value.trim())?;
        }
    }

    let mut unknown: Vec<&String> = raw
        .keys()
        .filter(|key| Field::from_key(key).is_none())
        .collect();
    unknown.sort();
    if let Some(key) = unknown.first() {
        return Err(ExtractError::unknown_key(key));
    }

    Ok(filters)
}

/// Check one strict value; the first spelling of a field keeps its slot
fn apply_strict(filters: &mut SwapFilters, field: Field, value: &str) -> Result<(), ExtractError> {
    let reject = |violation| -> Result<(), ExtractError> {
        Err(ValidationError::new(field, violation).into())
    };

    match field {
        Field::SwapCd | Field::Term if value.is_empty() => reject(Violation::NotANumber),
        Field::Brand | Field::Channel if value.is_empty() => reject(Violation::EmptyString),
        Field::StartDt | Field::EndDt if value.is_empty() => reject(Violation::InvalidDate),
        Field::SwapCd => {
            let swap_cd = parse_integer_str(field, value)?;
            keep_first(&mut filters.swap_cd, ParsedParam::Value(swap_cd));
            Ok(())
        }
        Field::Term => {
            let term = parse_integer_str(field, value)?;
            keep_first(&mut filters.term, ParsedParam::Value(term));
            Ok(())
        }
        Field::Brand => {
            keep_first(&mut filters.brand, value.to_string());
            Ok(())
        }
        Field::Channel => {
            keep_first(&mut filters.channel, value.to_string());
            Ok(())
        }
        Field::StartDt => {
            let date = strict_date(field, value)?;
            keep_first(&mut filters.start_date, ParsedParam::Value(date));
            Ok(())
        }
        Field::EndDt => {
            let date = strict_date(field, value)?;
            keep_first(&mut filters.end_date, ParsedParam::Value(date));
            Ok(())
        }
    }
}

fn keep_first<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

/// Leading whitespace, optional sign, then as many decimal digits as are present
fn parse_int_prefix(raw: &str) -> ParsedParam<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return ParsedParam::Malformed(raw.to_string());
    }

    let signed = if negative {
        format!("-{}", &rest[..digits_len])
    } else {
        rest[..digits_len].to_string()
    };
    signed
        .parse::<i64>()
        .map_or_else(|_| ParsedParam::Malformed(raw.to_string()), ParsedParam::Value)
}

fn lenient_date(raw: &str) -> ParsedParam<chrono::NaiveDate> {
    parse_date(raw).map_or_else(|| ParsedParam::Malformed(raw.to_string()), ParsedParam::Value)
}

fn strict_date(field: Field, raw: &str) -> Result<chrono::NaiveDate, ExtractError> {
    parse_date(raw).ok_or_else(|| ValidationError::new(field, Violation::InvalidDate).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn absent_filters_are_none() {
        let filters = extract_query_params(&HashMap::new());
        assert!(filters.is_empty());
    }

    #[test]
    fn empty_values_are_none() {
        let filters = extract_query_params(&query(&[("swapCd", ""), ("channel", "  ")]));
        assert!(filters.is_empty());
    }

    #[test]
    fn integer_prefix_semantics() {
        assert_eq!(parse_int_prefix("42"), ParsedParam::Value(42));
        assert_eq!(parse_int_prefix("  12abc"), ParsedParam::Value(12));
        assert_eq!(parse_int_prefix("-7"), ParsedParam::Value(-7));
        assert_eq!(parse_int_prefix("+3.9"), ParsedParam::Value(3));
        assert!(parse_int_prefix("abc").is_malformed());
        assert!(parse_int_prefix("-").is_malformed());
        assert!(parse_int_prefix("99999999999999999999").is_malformed());
    }

    #[test]
    fn lenient_extraction() {
        let filters = extract_query_params(&query(&[
            ("SwapCd", "6501"),
            ("brand", " 4 "),
            ("Channel", "offline"),
            ("term", "x"),
            ("startDate", "2025-06-10"),
            ("endDate", "not-a-date"),
            ("page", "2"),
        ]));

        assert_eq!(filters.swap_cd, Some(ParsedParam::Value(6501)));
        assert_eq!(filters.brand.as_deref(), Some("4"));
        assert_eq!(filters.channel.as_deref(), Some("offline"));
        assert!(filters.term.unwrap().is_malformed());
        assert_eq!(
            filters.start_date,
            Some(ParsedParam::Value("2025-06-10".parse().unwrap()))
        );
        assert!(filters.end_date.unwrap().is_malformed());
    }

    #[test]
    fn strict_rejects_unknown_keys() {
        let error = extract_query_params_strict(&query(&[("foo", "1")])).unwrap_err();
        assert_eq!(error.to_string(), "Invalid query parameters: \"foo\" is not allowed");
    }

    #[test]
    fn strict_rejects_partial_numbers() {
        let error = extract_query_params_strict(&query(&[("swapCd", "12abc")])).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid query parameters: SwapCd must be a number"
        );
    }

    #[test]
    fn strict_reports_value_errors_before_unknown_keys() {
        let error =
            extract_query_params_strict(&query(&[("zzz", "1"), ("endDate", "tomorrow")]))
                .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid query parameters: EndDt is not a valid date"
        );
    }

    #[test]
    fn lenient_alias_order_decides_duplicates() {
        let filters = extract_query_params(&query(&[
            ("Brand", "south"),
            ("brand", "north"),
            ("SwapCd", "2"),
            ("swapCd", " "),
        ]));
        assert_eq!(filters.brand.as_deref(), Some("north"));
        assert_eq!(filters.swap_cd, Some(ParsedParam::Value(2)));
    }

    #[test]
    fn strict_rejects_empty_values() {
        for (key, expected) in [
            ("swapCd", "SwapCd must be a number"),
            ("brand", "Brand cannot be an empty string"),
            ("startDate", "StartDt is not a valid date"),
        ] {
            let error = extract_query_params_strict(&query(&[(key, "  ")])).unwrap_err();
            assert_eq!(
                error.to_string(),
                format!("Invalid query parameters: {expected}"),
                "empty {key}"
            );
        }
    }

    #[test]
    fn strict_unknown_keys_reported_in_name_order() {
        let error = extract_query_params_strict(&query(&[("zeta", "1"), ("alpha", "2")]))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid query parameters: \"alpha\" is not allowed"
        );
    }

    #[test]
    fn strict_accepts_well_formed_query() {
        let filters = extract_query_params_strict(&query(&[
            ("swapCd", "6501"),
            ("term", "15"),
            ("endDate", "2025-07-20"),
        ]))
        .unwrap();
        assert_eq!(filters.pinned_swap_cd(), Some(6501));
        assert_eq!(filters.term, Some(ParsedParam::Value(15)));
    }
}

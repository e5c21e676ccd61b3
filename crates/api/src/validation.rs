// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Swap detail payload validation
//!
//! Payloads arrive as untyped JSON objects and are checked field by field in a fixed
//! order: `swapCd`, `brand`, `channel`, `term`, `startDate`, `endDate`. The first
//! violated rule is reported and nothing after it is checked.
//!
//! Every message comes from one template table keyed by [`Violation`], using the
//! display names `SwapCd`, `Brand`, `Channel`, `Term`, `StartDt` and `EndDt`.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use shared_types::{NewSwapDetail, NonEmptyString, SwapDetailPatch};
use thiserror::Error;

/// Message for an end date that does not follow the start date
pub const DATE_ORDER_MESSAGE: &str = "StartDt cannot be after EndDt";

/// A rejected payload, carrying the first violated rule's message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub(crate) fn new(field: Field, violation: Violation) -> Self {
        Self {
            message: violation.render(field),
        }
    }

    fn date_order() -> Self {
        Self {
            message: DATE_ORDER_MESSAGE.to_string(),
        }
    }

    /// The client-facing message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Swap detail attributes accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    SwapCd,
    Brand,
    Channel,
    Term,
    StartDt,
    EndDt,
}

impl Field {
    pub(crate) const ALL: [Field; 6] = [
        Field::SwapCd,
        Field::Brand,
        Field::Channel,
        Field::Term,
        Field::StartDt,
        Field::EndDt,
    ];

    /// Accepted input keys, canonical spelling first
    pub(crate) fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::SwapCd => &["swapCd", "SwapCd"],
            Field::Brand => &["brand", "branch", "Brand", "Branch"],
            Field::Channel => &["channel", "Channel"],
            Field::Term => &["term", "Term"],
            Field::StartDt => &["startDate", "startDt", "StartDt", "StartDate"],
            Field::EndDt => &["endDate", "endDt", "EndDt", "EndDate"],
        }
    }

    pub(crate) fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().iter().any(|alias| *alias == key))
    }

    fn display_name(self) -> &'static str {
        match self {
            Field::SwapCd => "SwapCd",
            Field::Brand => "Brand",
            Field::Channel => "Channel",
            Field::Term => "Term",
            Field::StartDt => "StartDt",
            Field::EndDt => "EndDt",
        }
    }

    /// First non-null value supplied under any alias
    fn lookup(self, input: &Map<String, Value>) -> Option<&Value> {
        self.aliases()
            .iter()
            .filter_map(|key| input.get(*key))
            .find(|value| !value.is_null())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Rule broken by a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    Required,
    NotANumber,
    NotAnInteger,
    NotPositive,
    NotAString,
    EmptyString,
    InvalidDate,
}

impl Violation {
    fn render(self, field: Field) -> String {
        match self {
            Violation::Required => format!("{field} is required"),
            Violation::NotANumber => format!("{field} must be a number"),
            Violation::NotAnInteger => format!("{field} must be an integer"),
            Violation::NotPositive => format!("{field} must be a positive number"),
            Violation::NotAString => format!("{field} must be a string"),
            Violation::EmptyString => format!("{field} cannot be an empty string"),
            Violation::InvalidDate => format!("{field} is not a valid date"),
        }
    }
}

/// Validate a create payload
///
/// Every field is required. Numeric fields accept JSON numbers or numeric strings;
/// `brand` also accepts a number and keeps its decimal text. The end date must be
/// strictly after the start date.
pub fn validate_new_swap_detail(
    input: &Map<String, Value>,
) -> Result<NewSwapDetail, ValidationError> {
    let swap_cd = integer(Field::SwapCd, required(Field::SwapCd, input)?)?;
    let brand = text(Field::Brand, required(Field::Brand, input)?, true)?;
    let channel = text(Field::Channel, required(Field::Channel, input)?, false)?;
    let term = term(required(Field::Term, input)?)?;
    let start_date = date(Field::StartDt, required(Field::StartDt, input)?)?;
    let end_date = date(Field::EndDt, required(Field::EndDt, input)?)?;
    ensure_ordered(start_date, end_date)?;

    Ok(NewSwapDetail {
        swap_cd,
        brand,
        channel,
        term,
        start_date,
        end_date,
    })
}

/// Validate a partial update
///
/// Only supplied fields are checked, with the same rules and order as a create.
/// `swapCd` and unknown keys are ignored; a `null` value counts as not supplied.
/// Both dates, when supplied together, must be ordered.
pub fn validate_swap_detail_patch(
    input: &Map<String, Value>,
) -> Result<SwapDetailPatch, ValidationError> {
    let brand = Field::Brand
        .lookup(input)
        .map(|value| text(Field::Brand, value, true))
        .transpose()?;
    let channel = Field::Channel
        .lookup(input)
        .map(|value| text(Field::Channel, value, false))
        .transpose()?;
    let term = Field::Term.lookup(input).map(term).transpose()?;
    let start_date = Field::StartDt
        .lookup(input)
        .map(|value| date(Field::StartDt, value))
        .transpose()?;
    let end_date = Field::EndDt
        .lookup(input)
        .map(|value| date(Field::EndDt, value))
        .transpose()?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        ensure_ordered(start, end)?;
    }

    Ok(SwapDetailPatch {
        brand,
        channel,
        term,
        start_date,
        end_date,
    })
}

fn required(field: Field, input: &Map<String, Value>) -> Result<&Value, ValidationError> {
    field
        .lookup(input)
        .ok_or_else(|| ValidationError::new(field, Violation::Required))
}

fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        Err(ValidationError::date_order())
    }
}

/// Coerce a JSON number or numeric string to an integer
pub(crate) fn integer(field: Field, value: &Value) -> Result<i64, ValidationError> {
    let reject = |violation| Err(ValidationError::new(field, violation));

    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                Some(float) if float.fract() != 0.0 => reject(Violation::NotAnInteger),
                _ => reject(Violation::NotANumber),
            }
        }
        Value::String(raw) => parse_integer_str(field, raw),
        _ => reject(Violation::NotANumber),
    }
}

/// Parse a whole decimal integer out of text; blank text counts as missing
pub(crate) fn parse_integer_str(field: Field, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, Violation::Required));
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Ok(int);
    }
    let violation = match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() && float.fract() != 0.0 => Violation::NotAnInteger,
        _ => Violation::NotANumber,
    };
    Err(ValidationError::new(field, violation))
}

fn term(value: &Value) -> Result<u32, ValidationError> {
    let term = integer(Field::Term, value)?;
    if term <= 0 {
        return Err(ValidationError::new(Field::Term, Violation::NotPositive));
    }
    u32::try_from(term).map_err(|_| ValidationError::new(Field::Term, Violation::NotANumber))
}

fn text(field: Field, value: &Value, accept_numbers: bool) -> Result<NonEmptyString, ValidationError> {
    let raw = match value {
        Value::String(raw) => raw.clone(),
        Value::Number(number) if accept_numbers => number.to_string(),
        _ => return Err(ValidationError::new(field, Violation::NotAString)),
    };
    NonEmptyString::trimmed(&raw).map_err(|_| ValidationError::new(field, Violation::EmptyString))
}

fn date(field: Field, value: &Value) -> Result<NaiveDate, ValidationError> {
    let Value::String(raw) = value else {
        return Err(ValidationError::new(field, Violation::InvalidDate));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, Violation::Required));
    }
    parse_date(trimmed).ok_or_else(|| ValidationError::new(field, Violation::InvalidDate))
}

/// Parse `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Query filters for swap detail lookups

use chrono::NaiveDate;

use crate::SwapDetail;

/// A query parameter that was present but may not have parsed
///
/// Malformed input is kept as a sentinel instead of failing the request. A
/// `Malformed` filter never matches any record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedParam<T> {
    /// The raw value parsed successfully
    Value(T),
    /// The raw value could not be parsed
    Malformed(String),
}

impl<T> ParsedParam<T> {
    /// The parsed value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Malformed(_) => None,
        }
    }

    /// Whether the raw value failed to parse
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// Filter set for swap detail queries
///
/// Every field is optional; an absent field does not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapFilters {
    /// Exact swap code
    pub swap_cd: Option<ParsedParam<i64>>,
    /// Exact brand
    pub brand: Option<String>,
    /// Exact channel
    pub channel: Option<String>,
    /// Exact term
    pub term: Option<ParsedParam<i64>>,
    /// Records starting on or after this date
    pub start_date: Option<ParsedParam<NaiveDate>>,
    /// Records ending on or before this date
    pub end_date: Option<ParsedParam<NaiveDate>>,
}

impl SwapFilters {
    /// Whether no filter is set
    pub fn is_empty(&self) -> bool {
        self.swap_cd.is_none()
            && self.brand.is_none()
            && self.channel.is_none()
            && self.term.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// The swap code this filter pins, when it names a well-formed one
    pub fn pinned_swap_cd(&self) -> Option<i64> {
        self.swap_cd.as_ref().and_then(ParsedParam::value).copied()
    }

    /// Check whether a record satisfies every set filter
    pub fn matches(&self, detail: &SwapDetail) -> bool {
        fn check<T>(filter: Option<&ParsedParam<T>>, accept: impl FnOnce(&T) -> bool) -> bool {
            match filter {
                None => true,
                Some(ParsedParam::Value(value)) => accept(value),
                Some(ParsedParam::Malformed(_)) => false,
            }
        }

        check(self.swap_cd.as_ref(), |cd| *cd == detail.swap_cd)
            && self
                .brand
                .as_deref()
                .is_none_or(|brand| brand == detail.brand.as_str())
            && self
                .channel
                .as_deref()
                .is_none_or(|channel| channel == detail.channel.as_str())
            && check(self.term.as_ref(), |term| *term == i64::from(detail.term))
            && check(self.start_date.as_ref(), |from| detail.start_date >= *from)
            && check(self.end_date.as_ref(), |until| detail.end_date <= *until)
    }
}

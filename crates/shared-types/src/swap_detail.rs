// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Swap detail record types
//!
//! A swap detail is the managed business record of the service, keyed by its unique
//! `swapCd`. Three shapes exist:
//!
//! - [`NewSwapDetail`]: a validated create payload, before persistence assigns an `id`
//! - [`SwapDetail`]: a persisted record
//! - [`SwapDetailPatch`]: a partial update where only supplied fields change

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::NonEmptyString;

/// Validated swap detail payload, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSwapDetail {
    /// Unique swap code
    #[schema(example = 6501)]
    pub swap_cd: i64,
    /// Brand (or branch) the swap belongs to
    #[schema(value_type = String, example = "4")]
    pub brand: NonEmptyString,
    /// Sales channel
    #[schema(value_type = String, example = "offline")]
    pub channel: NonEmptyString,
    /// Length of the swap
    #[schema(example = 15)]
    pub term: u32,
    /// First day of the swap
    #[schema(value_type = String, format = Date, example = "2025-06-10")]
    pub start_date: NaiveDate,
    /// Last day of the swap
    #[schema(value_type = String, format = Date, example = "2025-07-20")]
    pub end_date: NaiveDate,
}

/// Persisted swap detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapDetail {
    /// Identifier assigned by the persistence collaborator
    pub id: String,
    /// Unique swap code
    pub swap_cd: i64,
    /// Brand (or branch) the swap belongs to
    #[schema(value_type = String)]
    pub brand: NonEmptyString,
    /// Sales channel
    #[schema(value_type = String)]
    pub channel: NonEmptyString,
    /// Length of the swap
    pub term: u32,
    /// First day of the swap
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    /// Last day of the swap
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
}

impl SwapDetail {
    /// Build a persisted record from a validated payload and an assigned identifier
    pub fn from_new(id: impl Into<String>, new: NewSwapDetail) -> Self {
        Self {
            id: id.into(),
            swap_cd: new.swap_cd,
            brand: new.brand,
            channel: new.channel,
            term: new.term,
            start_date: new.start_date,
            end_date: new.end_date,
        }
    }

    /// Return a copy of this record with the supplied patch fields merged in
    ///
    /// `id` and `swap_cd` are never changed by a patch.
    #[must_use]
    pub fn merged(&self, patch: &SwapDetailPatch) -> Self {
        Self {
            id: self.id.clone(),
            swap_cd: self.swap_cd,
            brand: patch.brand.clone().unwrap_or_else(|| self.brand.clone()),
            channel: patch.channel.clone().unwrap_or_else(|| self.channel.clone()),
            term: patch.term.unwrap_or(self.term),
            start_date: patch.start_date.unwrap_or(self.start_date),
            end_date: patch.end_date.unwrap_or(self.end_date),
        }
    }

    /// Whether the record satisfies the `start_date < end_date` invariant
    pub fn has_valid_date_range(&self) -> bool {
        self.start_date < self.end_date
    }
}

/// Partial update of a swap detail
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapDetailPatch {
    /// New brand
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub brand: Option<NonEmptyString>,
    /// New channel
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub channel: Option<NonEmptyString>,
    /// New term
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<u32>,
    /// New start date
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    /// New end date
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
}

impl SwapDetailPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.channel.is_none()
            && self.term.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample() -> SwapDetail {
        SwapDetail::from_new(
            "789",
            NewSwapDetail {
                swap_cd: 6501,
                brand: NonEmptyString::new("4").unwrap(),
                channel: NonEmptyString::new("offline").unwrap(),
                term: 15,
                start_date: date("2025-06-10"),
                end_date: date("2025-07-20"),
            },
        )
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "789");
        assert_eq!(json["swapCd"], 6501);
        assert_eq!(json["brand"], "4");
        assert_eq!(json["startDate"], "2025-06-10");
        assert_eq!(json["endDate"], "2025-07-20");
    }

    #[test]
    fn merge_only_changes_supplied_fields() {
        let record = sample();
        let patch = SwapDetailPatch {
            channel: Some(NonEmptyString::new("online").unwrap()),
            term: Some(30),
            ..SwapDetailPatch::default()
        };

        let merged = record.merged(&patch);
        assert_eq!(merged.id, record.id);
        assert_eq!(merged.swap_cd, record.swap_cd);
        assert_eq!(merged.brand, record.brand);
        assert_eq!(merged.channel.as_str(), "online");
        assert_eq!(merged.term, 30);
        assert_eq!(merged.start_date, record.start_date);
    }

    #[test]
    fn date_range_check() {
        let mut record = sample();
        assert!(record.has_valid_date_range());

        record.end_date = record.start_date;
        assert!(!record.has_valid_date_range());
    }

    #[test]
    fn empty_patch() {
        assert!(SwapDetailPatch::default().is_empty());
        let patch = SwapDetailPatch {
            term: Some(1),
            ..SwapDetailPatch::default()
        };
        assert!(!patch.is_empty());
    }
}

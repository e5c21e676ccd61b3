// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory swap detail store
//!
//! Records live in a `DashMap` keyed by `swap_cd`, so every operation on one key is
//! atomic with respect to concurrent requests for the same key.

use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Instant,
};

use async_trait::async_trait;
use dashmap::{DashMap, mapref::entry::Entry};
use shared_types::{NewSwapDetail, SwapDetail, SwapDetailPatch, SwapFilters};
use tracing::debug;
use uuid::Uuid;

use crate::{HealthCheckResult, StoreError, SwapDetailsStore};

/// Reason code for a create that reuses an existing swap code
pub const DUPLICATE_SWAP_CD: &str = "DUPLICATE_SWAP_CD";
/// Reason code for an update whose merged dates are out of order
pub const INVALID_DATE_RANGE: &str = "INVALID_DATE_RANGE";

/// Swap detail store kept in process memory
#[derive(Debug)]
pub struct InMemorySwapStore {
    records: DashMap<i64, SwapDetail>,
    connected: AtomicBool,
}

impl Default for InMemorySwapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySwapStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            connected: AtomicBool::new(true),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Mark the store as reachable or not for health probes
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }
}

#[async_trait]
impl SwapDetailsStore for InMemorySwapStore {
    async fn add(&self, detail: NewSwapDetail) -> Result<SwapDetail, StoreError> {
        match self.records.entry(detail.swap_cd) {
            Entry::Occupied(_) => Err(StoreError::rejected(format!(
                "Swap detail with SwapCd {} already exists.",
                detail.swap_cd
            ))
            .with_status_code(409)
            .with_reason_code(DUPLICATE_SWAP_CD)),
            Entry::Vacant(slot) => {
                let record = SwapDetail::from_new(Uuid::new_v4().to_string(), detail);
                debug!(swap_cd = record.swap_cd, id = %record.id, "Stored swap detail");
                Ok(slot.insert(record).clone())
            }
        }
    }

    async fn query(&self, filters: &SwapFilters) -> Result<Vec<SwapDetail>, StoreError> {
        let mut matches: Vec<SwapDetail> = self
            .records
            .iter()
            .filter(|entry| filters.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|detail| detail.swap_cd);
        Ok(matches)
    }

    async fn update(
        &self,
        swap_cd: i64,
        patch: SwapDetailPatch,
    ) -> Result<Option<SwapDetail>, StoreError> {
        let Some(mut entry) = self.records.get_mut(&swap_cd) else {
            return Ok(None);
        };

        let merged = entry.merged(&patch);
        if !merged.has_valid_date_range() {
            return Err(StoreError::rejected("StartDt cannot be after EndDt")
                .with_status_code(400)
                .with_reason_code(INVALID_DATE_RANGE));
        }

        *entry = merged.clone();
        debug!(swap_cd, "Updated swap detail");
        Ok(Some(merged))
    }

    async fn remove(&self, swap_cd: i64) -> Result<bool, StoreError> {
        let removed = self.records.remove(&swap_cd).is_some();
        debug!(swap_cd, removed, "Removed swap detail");
        Ok(removed)
    }

    async fn health_check(&self) -> Result<HealthCheckResult, StoreError> {
        let started = Instant::now();
        let result = if self.connected.load(Ordering::Relaxed) {
            HealthCheckResult::healthy(started.elapsed())
        } else {
            HealthCheckResult::unhealthy(started.elapsed(), "Store is disconnected".to_string())
        };
        Ok(result.with_details(format!("{} records", self.records.len())))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::NonEmptyString;

    fn new_detail(swap_cd: i64) -> NewSwapDetail {
        NewSwapDetail {
            swap_cd,
            brand: NonEmptyString::new("4").unwrap(),
            channel: NonEmptyString::new("offline").unwrap(),
            term: 15,
            start_date: "2025-06-10".parse().unwrap(),
            end_date: "2025-07-20".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn assigns_distinct_ids() {
        let store = InMemorySwapStore::new();
        let first = store.add(new_detail(1)).await.unwrap();
        let second = store.add(new_detail(2)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn rejects_duplicate_swap_cd() {
        let store = InMemorySwapStore::new();
        store.add(new_detail(6501)).await.unwrap();

        let error = store.add(new_detail(6501)).await.unwrap_err();
        assert_eq!(error.status_code(), Some(409));
        assert_eq!(error.reason_code(), Some(DUPLICATE_SWAP_CD));
        assert_eq!(
            error.to_string(),
            "Swap detail with SwapCd 6501 already exists."
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn update_rejects_inverted_dates_without_writing() {
        let store = InMemorySwapStore::new();
        let stored = store.add(new_detail(7)).await.unwrap();

        let patch = SwapDetailPatch {
            start_date: Some("2025-08-01".parse().unwrap()),
            ..SwapDetailPatch::default()
        };
        let error = store.update(7, patch).await.unwrap_err();
        assert_eq!(error.reason_code(), Some(INVALID_DATE_RANGE));

        let current = store.query(&SwapFilters::default()).await.unwrap();
        assert_eq!(current, vec![stored]);
    }

    #[tokio::test]
    async fn health_follows_connection_flag() {
        let store = InMemorySwapStore::default();
        assert!(store.health_check().await.unwrap().status.is_available());

        store.set_connected(false);
        assert!(store.health_check().await.unwrap().status.is_down());
    }
}
